//! Eraser: restore base map pixels under the brush

use tracing::debug;

use super::AnnotationEngine;
use crate::types::{Point, Rect};

impl AnnotationEngine {
    /// Square covered by the eraser at `at`: side `2 * radius`, clipped to the canvas
    ///
    /// The box is half-open, `[x - r, x + r) x [y - r, y + r)`.
    pub fn eraser_region(&self, at: Point) -> Option<Rect> {
        let r = self.eraser_radius as i64;
        let (x, y) = (at.x as i64, at.y as i64);
        Rect::clipped(x - r, y - r, x + r, y + r, self.width(), self.height())
    }

    /// Copy the eraser square from the base map into the canvas
    ///
    /// Returns the restored rectangle, or None if the brush is entirely off the canvas.
    pub(crate) fn erase(&mut self, at: Point) -> Option<Rect> {
        let Some(region) = self.eraser_region(at) else {
            debug!("erase at {:?}: outside canvas", at);
            return None;
        };

        let restored = self.surface.restore_region(self.base.image(), region);
        debug!(
            "erase at {:?} (radius {}): restored {:?}",
            at, self.eraser_radius, restored
        );
        restored
    }
}
