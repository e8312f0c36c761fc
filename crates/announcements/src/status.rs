//! Announcement status tags

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Indicator color for empty slots and unrecognized tags
pub const NEUTRAL_COLOR: &str = "#666666";

/// Status tag attached to every announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Info,
    Alert,
    Warning,
    Urgent,
    Critical,
    Maintenance,
    Exercise,
    Weather,
    Security,
    Routine,
    Update,
    Completed,
}

impl Status {
    /// All tags in form menu order
    pub const ALL: [Status; 12] = [
        Status::Info,
        Status::Alert,
        Status::Warning,
        Status::Urgent,
        Status::Critical,
        Status::Maintenance,
        Status::Exercise,
        Status::Weather,
        Status::Security,
        Status::Routine,
        Status::Update,
        Status::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Info => "INFO",
            Status::Alert => "ALERT",
            Status::Warning => "WARNING",
            Status::Urgent => "URGENT",
            Status::Critical => "CRITICAL",
            Status::Maintenance => "MAINTENANCE",
            Status::Exercise => "EXERCISE",
            Status::Weather => "WEATHER",
            Status::Security => "SECURITY",
            Status::Routine => "ROUTINE",
            Status::Update => "UPDATE",
            Status::Completed => "COMPLETED",
        }
    }

    /// Indicator color as "#rrggbb"
    pub fn color(self) -> &'static str {
        match self {
            Status::Info => "#3156dd",
            Status::Alert => "#e3e32d",
            Status::Warning => "#dd3754",
            Status::Urgent => "#ff00ff",
            Status::Critical => "#ff0000",
            Status::Maintenance => "#00ffff",
            Status::Exercise => "#00ff00",
            Status::Weather => "#ffa500",
            Status::Security => "#800080",
            Status::Routine => "#666666",
            Status::Update => "#ffff00",
            Status::Completed => "#008000",
        }
    }

    /// Exact tag lookup, as stored in documents
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == tag)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    /// Case-insensitive, for user input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ValidationError::UnknownStatus(tag.to_string()))
    }
}

/// Indicator color for a raw tag; unknown tags get the neutral color
pub fn status_color(tag: &str) -> &'static str {
    Status::from_tag(tag).map_or(NEUTRAL_COLOR, Status::color)
}
