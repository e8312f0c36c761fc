//! Announcement store abstraction

use tracing::{debug, info};

use crate::error::{StoreError, ValidationError};
use crate::record::{Announcement, NewAnnouncement};

/// Backend holding the announcement collection
///
/// Implementations take `&self` so one store can be shared between the
/// board refresh and admin operations.
pub trait AnnouncementStore: Send + Sync {
    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Check if the backend can accept requests
    fn is_available(&self) -> bool {
        true
    }

    /// Store a new announcement stamped with the current time, returning its id
    fn create(&self, announcement: &NewAnnouncement) -> Result<String, StoreError>;

    /// All announcements, newest first
    fn list(&self) -> Result<Vec<Announcement>, StoreError>;

    /// Remove one announcement by id
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Remove every announcement, returning how many were deleted
    fn delete_all(&self) -> Result<usize, StoreError> {
        let ids: Vec<String> = self.list()?.into_iter().map(|a| a.id).collect();
        if ids.is_empty() {
            return Ok(0);
        }
        let count = delete_many(self, &ids)?;
        info!("{}: deleted all {} announcements", self.name(), count);
        Ok(count)
    }
}

/// Delete a selection of announcements, stopping at the first failure
///
/// An empty selection is rejected. Returns the number deleted.
pub fn delete_many<S>(store: &S, ids: &[String]) -> Result<usize, StoreError>
where
    S: AnnouncementStore + ?Sized,
{
    if ids.is_empty() {
        return Err(ValidationError::NothingSelected.into());
    }
    for id in ids {
        store.delete(id)?;
        debug!("{}: deleted announcement {}", store.name(), id);
    }
    Ok(ids.len())
}

/// Store used when no backend is configured
///
/// Lists nothing and refuses every mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineStore;

impl AnnouncementStore for OfflineStore {
    fn name(&self) -> &str {
        "offline"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn create(&self, _announcement: &NewAnnouncement) -> Result<String, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn list(&self) -> Result<Vec<Announcement>, StoreError> {
        Ok(Vec::new())
    }

    fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    #[test]
    fn test_offline_store() {
        let store = OfflineStore;
        assert!(!store.is_available());
        assert!(store.list().unwrap().is_empty());

        let form = NewAnnouncement::new("Fuel", "Late", Status::Info, "Ops").unwrap();
        assert!(matches!(store.create(&form), Err(StoreError::Unavailable)));
        assert!(matches!(store.delete("x"), Err(StoreError::Unavailable)));
        assert!(matches!(store.delete_all(), Err(StoreError::Unavailable)));
    }

    #[test]
    fn test_delete_many_empty_selection() {
        let result = delete_many(&OfflineStore, &[]);
        assert!(matches!(
            result,
            Err(StoreError::Validation(ValidationError::NothingSelected))
        ));
        assert_eq!(
            result.unwrap_err().to_string(),
            "No announcements selected for deletion."
        );
    }
}
