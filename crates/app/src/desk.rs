//! Announcements tab: admin gate, store and board behind one command handler

use std::time::Duration;

use planner_announcements::{
    AccessError, AdminGate, AnnouncementBoard, AnnouncementStore, FirestoreStore,
    NewAnnouncement, OfflineStore, Slot, StoreError, delete_many,
};
use planner_config::AnnouncementConfig;
use planner_ipc::{AnnouncementCommand, EngineToUi, NoticeLevel, SlotView};
use tracing::{debug, info, warn};

/// Pick the store backend from configuration
pub fn build_store(config: &AnnouncementConfig) -> Box<dyn AnnouncementStore> {
    match config.project_id.as_deref() {
        Some(project_id) if config.is_enabled() => {
            info!(
                "Announcements backed by Firestore project {} ({})",
                project_id, config.collection
            );
            Box::new(FirestoreStore::new(
                project_id.trim(),
                config.collection.clone(),
                config.api_token.clone(),
                Duration::from_secs(config.request_timeout_secs),
            ))
        }
        _ => {
            info!("No announcement store configured, running offline");
            Box::new(OfflineStore)
        }
    }
}

pub fn slot_view(slot: &Slot) -> SlotView {
    SlotView {
        subject: slot.subject().to_string(),
        details: slot.details().to_string(),
        status_tag: slot.status_tag().to_string(),
        author_tag: slot.author_tag().to_string(),
        color: slot.color().to_string(),
        id: slot.id().map(str::to_string),
    }
}

fn notice(level: NoticeLevel, message: impl Into<String>) -> EngineToUi {
    EngineToUi::Notice {
        level,
        message: message.into(),
    }
}

/// Handles [`AnnouncementCommand`]s against one store
pub struct AnnouncementDesk {
    store: Box<dyn AnnouncementStore>,
    board: AnnouncementBoard,
    gate: AdminGate,
}

impl AnnouncementDesk {
    pub fn new(store: Box<dyn AnnouncementStore>, gate: AdminGate, slot_count: usize) -> Self {
        Self {
            store,
            board: AnnouncementBoard::new(slot_count),
            gate,
        }
    }

    pub fn from_config(config: &AnnouncementConfig) -> Self {
        Self::new(
            build_store(config),
            AdminGate::new(config.admin_code.clone()),
            config.slot_count,
        )
    }

    pub fn board(&self) -> &AnnouncementBoard {
        &self.board
    }

    pub fn store(&self) -> &dyn AnnouncementStore {
        self.store.as_ref()
    }

    pub fn handle(&mut self, command: AnnouncementCommand) -> Vec<EngineToUi> {
        match command {
            AnnouncementCommand::Refresh => self.refresh(),
            AnnouncementCommand::Post {
                code,
                subject,
                details,
                status,
                by_who,
            } => self.gated(code.as_deref(), |desk| {
                desk.post(&subject, &details, &status, &by_who)
            }),
            AnnouncementCommand::Delete { code, ids } => {
                self.gated(code.as_deref(), |desk| desk.delete_selected(&ids))
            }
            AnnouncementCommand::DeleteAll { code } => {
                self.gated(code.as_deref(), Self::delete_all)
            }
        }
    }

    /// Reload the board; a failed fetch shows the waiting state plus an error notice
    pub fn refresh(&mut self) -> Vec<EngineToUi> {
        let mut out = Vec::with_capacity(2);
        if let Err(e) = self.board.refresh(self.store.as_ref()) {
            out.push(notice(
                NoticeLevel::Error,
                format!("Failed to fetch announcements: {}", e),
            ));
        }
        out.push(EngineToUi::AnnouncementsUpdated {
            slots: self.board.slots().iter().map(slot_view).collect(),
        });
        out
    }

    fn gated(
        &mut self,
        code: Option<&str>,
        action: impl FnOnce(&mut Self) -> Vec<EngineToUi>,
    ) -> Vec<EngineToUi> {
        match self.gate.authorize(code) {
            Ok(()) => action(self),
            Err(AccessError::Cancelled) => {
                debug!("Admin code prompt cancelled");
                Vec::new()
            }
            Err(e @ AccessError::Denied) => vec![notice(NoticeLevel::Error, e.to_string())],
        }
    }

    fn post(&mut self, subject: &str, details: &str, status: &str, by_who: &str) -> Vec<EngineToUi> {
        let form = match NewAnnouncement::parse(subject, details, status, by_who) {
            Ok(form) => form,
            Err(e) => return vec![notice(NoticeLevel::Warning, e.to_string())],
        };

        match self.store.create(&form) {
            Ok(id) => {
                info!("Posted announcement {}", id);
                let mut out = vec![notice(NoticeLevel::Info, "Announcement posted.")];
                out.extend(self.refresh());
                out
            }
            Err(e @ StoreError::Unavailable) => vec![notice(NoticeLevel::Error, e.to_string())],
            Err(e) => {
                warn!("Failed to post announcement: {}", e);
                vec![notice(
                    NoticeLevel::Error,
                    format!("Failed to post announcement: {}", e),
                )]
            }
        }
    }

    fn delete_selected(&mut self, ids: &[String]) -> Vec<EngineToUi> {
        match delete_many(self.store.as_ref(), ids) {
            Ok(count) => {
                let mut out = vec![notice(
                    NoticeLevel::Info,
                    format!("Deleted {} announcement(s).", count),
                )];
                out.extend(self.refresh());
                out
            }
            Err(StoreError::Validation(e)) => vec![notice(NoticeLevel::Warning, e.to_string())],
            Err(e @ StoreError::Unavailable) => vec![notice(NoticeLevel::Error, e.to_string())],
            Err(e) => {
                warn!("Failed to delete announcements: {}", e);
                // Some may have gone before the failure
                let mut out = vec![notice(
                    NoticeLevel::Error,
                    format!("Failed to delete announcements: {}", e),
                )];
                out.extend(self.refresh());
                out
            }
        }
    }

    fn delete_all(&mut self) -> Vec<EngineToUi> {
        match self.store.delete_all() {
            Ok(count) => {
                let mut out = vec![notice(
                    NoticeLevel::Info,
                    format!("Deleted all {} announcements.", count),
                )];
                out.extend(self.refresh());
                out
            }
            Err(e @ StoreError::Unavailable) => vec![notice(NoticeLevel::Error, e.to_string())],
            Err(e) => {
                warn!("Failed to delete all announcements: {}", e);
                let mut out = vec![notice(
                    NoticeLevel::Error,
                    format!("Failed to delete all announcements: {}", e),
                )];
                out.extend(self.refresh());
                out
            }
        }
    }
}
