//! Announcement records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::status::{Status, status_color};

/// Longest subject shown in a list summary before truncation
const SUMMARY_SUBJECT_LEN: usize = 35;

/// A stored announcement
///
/// `status` is kept as the raw tag so documents written by other clients
/// with unknown tags still display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub subject: String,
    pub details: String,
    pub status: String,
    pub by_who: String,
    pub timestamp: DateTime<Utc>,
}

impl Announcement {
    /// Indicator color for this announcement's status
    pub fn color(&self) -> &'static str {
        status_color(&self.status)
    }

    /// One-line label used when choosing announcements to delete
    pub fn summary(&self) -> String {
        let subject = if self.subject.chars().count() > SUMMARY_SUBJECT_LEN {
            let truncated: String = self.subject.chars().take(SUMMARY_SUBJECT_LEN).collect();
            format!("{truncated}...")
        } else {
            self.subject.clone()
        };
        format!("{} | {} | {}", subject, self.status, self.by_who)
    }
}

/// A validated announcement ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    subject: String,
    details: String,
    status: Status,
    by_who: String,
}

impl NewAnnouncement {
    /// Trim and validate form input
    ///
    /// Fields are checked in form order and the first blank one is reported.
    pub fn new(
        subject: &str,
        details: &str,
        status: Status,
        by_who: &str,
    ) -> Result<Self, ValidationError> {
        let subject = subject.trim();
        let details = details.trim();
        let by_who = by_who.trim();

        if subject.is_empty() {
            return Err(ValidationError::SubjectRequired);
        }
        if details.is_empty() {
            return Err(ValidationError::DetailsRequired);
        }
        if by_who.is_empty() {
            return Err(ValidationError::SenderRequired);
        }

        Ok(Self {
            subject: subject.to_string(),
            details: details.to_string(),
            status,
            by_who: by_who.to_string(),
        })
    }

    /// Like [`NewAnnouncement::new`] but with the status as entered text
    pub fn parse(
        subject: &str,
        details: &str,
        status: &str,
        by_who: &str,
    ) -> Result<Self, ValidationError> {
        let form = Self::new(subject, details, Status::default(), by_who)?;
        Ok(Self {
            status: status.parse()?,
            ..form
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn by_who(&self) -> &str {
        &self.by_who
    }

    /// Stamp with an id and time to produce the stored record
    pub fn into_announcement(self, id: String, timestamp: DateTime<Utc>) -> Announcement {
        Announcement {
            id,
            subject: self.subject,
            details: self.details,
            status: self.status.as_str().to_string(),
            by_who: self.by_who,
            timestamp,
        }
    }
}
