//! Drawing tool commands.

use serde::{Deserialize, Serialize};

/// Drawing mode selected in the map toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    #[default]
    Straight,
    Freehand,
    Eraser,
}
