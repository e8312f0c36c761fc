//! In-process announcement store

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::StoreError;
use crate::record::{Announcement, NewAnnouncement};
use crate::store::AnnouncementStore;

struct Entry {
    seq: u64,
    announcement: Announcement,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    entries: Vec<Entry>,
}

/// Announcement store held in memory
///
/// Used for tests and for running the planner without a remote backend
/// while still exercising the admin flows. Insertion order breaks
/// timestamp ties so listing stays newest-first.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record with a caller-chosen timestamp, returning its id
    pub fn insert_at(&self, announcement: &NewAnnouncement, timestamp: DateTime<Utc>) -> String {
        let mut inner = self.inner.write().expect("MemoryStore lock poisoned");
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let id = format!("mem-{seq}");
        inner.entries.push(Entry {
            seq,
            announcement: announcement.clone().into_announcement(id.clone(), timestamp),
        });
        debug!("MemoryStore: inserted {}", id);
        id
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("MemoryStore lock poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnnouncementStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn create(&self, announcement: &NewAnnouncement) -> Result<String, StoreError> {
        Ok(self.insert_at(announcement, Utc::now()))
    }

    fn list(&self) -> Result<Vec<Announcement>, StoreError> {
        let inner = self.inner.read().expect("MemoryStore lock poisoned");
        let mut entries: Vec<&Entry> = inner.entries.iter().collect();
        entries.sort_by(|a, b| {
            (b.announcement.timestamp, b.seq).cmp(&(a.announcement.timestamp, a.seq))
        });
        Ok(entries.into_iter().map(|e| e.announcement.clone()).collect())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("MemoryStore lock poisoned");
        let before = inner.entries.len();
        inner.entries.retain(|e| e.announcement.id != id);
        if inner.entries.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
