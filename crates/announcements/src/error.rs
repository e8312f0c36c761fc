//! Error types for announcement operations

use thiserror::Error;

/// Form input rejected before reaching the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Subject is required.")]
    SubjectRequired,
    #[error("Details are required.")]
    DetailsRequired,
    #[error("Sender (By) is required.")]
    SenderRequired,
    #[error("Unknown status: {0}")]
    UnknownStatus(String),
    #[error("No announcements selected for deletion.")]
    NothingSelected,
}

/// Admin code check failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Code entry cancelled")]
    Cancelled,
    #[error("Invalid code.")]
    Denied,
}

/// Announcement store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Announcement store is not configured")]
    Unavailable,

    #[error("Store request failed: {0}")]
    Request(String),

    #[error("Store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid store response: {0}")]
    InvalidResponse(String),

    #[error("Announcement not found: {0}")]
    NotFound(String),

    #[error("Invalid announcement id: {0:?}")]
    InvalidId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
