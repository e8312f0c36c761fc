//! Announcement board commands.

use serde::{Deserialize, Serialize};

/// Commands issued from the announcements tab.
///
/// Mutating commands carry the admin code typed by the user; `None` means
/// the code prompt was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AnnouncementCommand {
    /// Re-fetch the most recent announcements
    Refresh,
    /// Post a new announcement
    Post {
        code: Option<String>,
        subject: String,
        details: String,
        /// Status tag, e.g. "INFO" or "WEATHER"
        status: String,
        by_who: String,
    },
    /// Delete the selected announcements by id
    Delete { code: Option<String>, ids: Vec<String> },
    /// Delete every announcement
    DeleteAll { code: Option<String> },
}
