//! Main IPC message enums for communication between the engine and UI.

use serde::{Deserialize, Serialize};

use crate::commands::{AnnouncementCommand, DrawMode};
use crate::input::PointerEvent;
use crate::types::{Bounds, NoticeLevel, SlotView};

/// Messages from the UI to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEngine {
    /// Select straight, freehand or eraser
    SetMode { mode: DrawMode },

    /// Select a palette color by name
    SetColor { name: String },

    /// Eraser size slider moved
    SetEraserRadius { radius: i64 },

    /// Pointer activity over the map
    Pointer(PointerEvent),

    /// Restore the whole map, dropping every annotation
    ClearAnnotations,

    /// Announcements tab actions
    Announcement(AnnouncementCommand),
}

/// Messages from the engine to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToUi {
    /// The canvas changed inside `bounds`; redraw it
    CanvasChanged { bounds: Bounds },

    /// A straight-line preview is ready to display in place of the canvas
    PreviewReady { width: u32, height: u32 },

    /// The announcement board was refreshed
    AnnouncementsUpdated { slots: Vec<SlotView> },

    /// Something to tell the user (success, validation failure, store error)
    Notice { level: NoticeLevel, message: String },
}
