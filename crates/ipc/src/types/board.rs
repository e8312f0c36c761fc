//! Announcement board display types.

use serde::{Deserialize, Serialize};

/// What one board slot should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub subject: String,
    pub details: String,
    /// Status tag text ("---" for an empty slot)
    pub status_tag: String,
    /// Sender text ("---" for an empty slot)
    pub author_tag: String,
    /// Status indicator color as "#rrggbb"
    pub color: String,
    /// Document id, for deletion
    pub id: Option<String>,
}
