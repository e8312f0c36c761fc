//! Fixed-slot announcement board

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::record::Announcement;
use crate::status::NEUTRAL_COLOR;
use crate::store::AnnouncementStore;

/// Subject shown in an empty slot
pub const WAITING_SUBJECT: &str = "Waiting for announcement...";

/// Details shown in an empty slot
pub const NO_DETAILS: &str = "No announcements available";

/// Status and author tag shown in an empty slot
pub const EMPTY_TAG: &str = "---";

/// One board slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Waiting,
    Filled(Announcement),
}

impl Slot {
    pub fn subject(&self) -> &str {
        match self {
            Slot::Waiting => WAITING_SUBJECT,
            Slot::Filled(a) => &a.subject,
        }
    }

    pub fn details(&self) -> &str {
        match self {
            Slot::Waiting => NO_DETAILS,
            Slot::Filled(a) => &a.details,
        }
    }

    pub fn status_tag(&self) -> &str {
        match self {
            Slot::Waiting => EMPTY_TAG,
            Slot::Filled(a) => &a.status,
        }
    }

    pub fn author_tag(&self) -> &str {
        match self {
            Slot::Waiting => EMPTY_TAG,
            Slot::Filled(a) => &a.by_who,
        }
    }

    /// Status indicator color
    pub fn color(&self) -> &'static str {
        match self {
            Slot::Waiting => NEUTRAL_COLOR,
            Slot::Filled(a) => a.color(),
        }
    }

    /// Document id of the shown announcement
    pub fn id(&self) -> Option<&str> {
        match self {
            Slot::Waiting => None,
            Slot::Filled(a) => Some(&a.id),
        }
    }
}

/// The most recent announcements in a fixed number of slots
#[derive(Debug, Clone)]
pub struct AnnouncementBoard {
    slots: Vec<Slot>,
}

impl AnnouncementBoard {
    /// Create a board with `slot_count` waiting slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![Slot::Waiting; slot_count],
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots showing an announcement
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Filled(_))).count()
    }

    /// Fill slots in order from a newest-first list; extra slots wait
    pub fn fill(&mut self, newest_first: Vec<Announcement>) {
        let mut incoming = newest_first.into_iter();
        for slot in &mut self.slots {
            *slot = incoming.next().map_or(Slot::Waiting, Slot::Filled);
        }
    }

    /// Put every slot back in the waiting state
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Waiting);
    }

    /// Reload from the store
    ///
    /// On failure the board shows the waiting state and the error is
    /// returned for the caller to report. Returns the number of filled slots.
    pub fn refresh<S>(&mut self, store: &S) -> Result<usize, StoreError>
    where
        S: AnnouncementStore + ?Sized,
    {
        match store.list() {
            Ok(list) => {
                self.fill(list);
                debug!("Board refreshed from {}: {} filled", store.name(), self.filled_count());
                Ok(self.filled_count())
            }
            Err(e) => {
                warn!("Failed to fetch announcements: {}", e);
                self.clear();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::memory::MemoryStore;
    use crate::record::NewAnnouncement;
    use crate::status::Status;
    use crate::store::OfflineStore;

    struct FailingStore;

    impl AnnouncementStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        fn create(&self, _: &NewAnnouncement) -> Result<String, StoreError> {
            Err(StoreError::Request("connection refused".to_string()))
        }

        fn list(&self) -> Result<Vec<Announcement>, StoreError> {
            Err(StoreError::Request("connection refused".to_string()))
        }

        fn delete(&self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Request("connection refused".to_string()))
        }
    }

    fn seeded(count: u32) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 0..count {
            let form =
                NewAnnouncement::new(&format!("notice {i}"), "details", Status::Weather, "Ops")
                    .unwrap();
            store.insert_at(&form, Utc.with_ymd_and_hms(2024, 1, 1, i, 0, 0).unwrap());
        }
        store
    }

    #[test]
    fn test_new_board_waits() {
        let board = AnnouncementBoard::new(3);
        assert_eq!(board.slot_count(), 3);
        for slot in board.slots() {
            assert_eq!(slot.subject(), "Waiting for announcement...");
            assert_eq!(slot.details(), "No announcements available");
            assert_eq!(slot.status_tag(), "---");
            assert_eq!(slot.author_tag(), "---");
            assert_eq!(slot.color(), "#666666");
            assert_eq!(slot.id(), None);
        }
    }

    #[test]
    fn test_refresh_shows_three_most_recent() {
        let store = seeded(5);
        let mut board = AnnouncementBoard::new(3);

        assert_eq!(board.refresh(&store).unwrap(), 3);
        let subjects: Vec<&str> = board.slots().iter().map(|s| s.subject()).collect();
        assert_eq!(subjects, vec!["notice 4", "notice 3", "notice 2"]);
        assert_eq!(board.slots()[0].color(), "#ffa500");
        assert!(board.slots()[0].id().is_some());
    }

    #[test]
    fn test_refresh_partial() {
        let store = seeded(1);
        let mut board = AnnouncementBoard::new(3);

        assert_eq!(board.refresh(&store).unwrap(), 1);
        assert_eq!(board.slots()[0].status_tag(), "WEATHER");
        assert_eq!(board.slots()[1], Slot::Waiting);
        assert_eq!(board.slots()[2], Slot::Waiting);
    }

    #[test]
    fn test_refresh_failure_shows_waiting() {
        let mut board = AnnouncementBoard::new(3);
        board.refresh(&seeded(3)).unwrap();
        assert_eq!(board.filled_count(), 3);

        assert!(board.refresh(&FailingStore).is_err());
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_offline_board_is_empty() {
        let mut board = AnnouncementBoard::new(3);
        assert_eq!(board.refresh(&OfflineStore).unwrap(), 0);
        assert!(board.slots().iter().all(|s| *s == Slot::Waiting));
    }
}
