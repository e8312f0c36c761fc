//! Announcement board for the mission planner
//!
//! Announcements live in a remote document collection. This crate provides:
//! - [`Status`] - the twelve status tags and their indicator colors
//! - [`AnnouncementStore`] - create / list / delete / delete-all over any backend
//! - [`MemoryStore`], [`OfflineStore`] and [`FirestoreStore`] backends
//! - [`AnnouncementBoard`] - the fixed three-slot display
//! - [`AdminGate`] - the admin code check guarding posts and deletions

mod admin;
mod board;
mod error;
mod firestore;
mod memory;
mod record;
mod status;
mod store;

pub use admin::AdminGate;
pub use board::{AnnouncementBoard, Slot, EMPTY_TAG, NO_DETAILS, WAITING_SUBJECT};
pub use error::{AccessError, StoreError, ValidationError};
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use record::{Announcement, NewAnnouncement};
pub use status::{NEUTRAL_COLOR, Status, status_color};
pub use store::{AnnouncementStore, OfflineStore, delete_many};
