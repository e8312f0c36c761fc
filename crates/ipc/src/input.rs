//! Pointer events over the map canvas.

use serde::{Deserialize, Serialize};

/// Primary-button pointer lifecycle, in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { x: i32, y: i32 },
    Drag { x: i32, y: i32 },
    Up { x: i32, y: i32 },
}

impl PointerEvent {
    /// Pointer position carried by the event.
    pub fn position(&self) -> (i32, i32) {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Drag { x, y } | PointerEvent::Up { x, y } => {
                (x, y)
            }
        }
    }
}
