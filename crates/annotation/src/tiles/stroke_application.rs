//! Stroke application with dirty tracking

use image::{Rgba, RgbaImage};
use tracing::debug;

use super::TiledCanvas;
use crate::raster;
use crate::types::{Point, Rect};

impl TiledCanvas {
    /// Set one pixel and mark its tile dirty
    pub fn draw_point(&mut self, at: Point, color: Rgba<u8>) -> Option<Rect> {
        let touched = raster::draw_point(&mut self.canvas, at, color)?;
        self.mark_region_dirty(touched);
        Some(touched)
    }

    /// Draw a line of `width` and mark the covered tiles dirty
    pub fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgba<u8>,
        width: u32,
    ) -> Option<Rect> {
        let touched = raster::draw_line(&mut self.canvas, from, to, color, width);
        match touched {
            Some(rect) => {
                debug!("draw_line {:?} -> {:?}: affected {:?}", from, to, rect);
                self.mark_region_dirty(rect);
            }
            None => debug!("draw_line {:?} -> {:?}: outside canvas", from, to),
        }
        touched
    }

    /// Copy `rect` back from `source` (same dimensions) and mark it dirty
    pub fn restore_region(&mut self, source: &RgbaImage, rect: Rect) -> Option<Rect> {
        let restored = self.canvas.copy_region_from(source, rect)?;
        self.mark_region_dirty(restored);
        Some(restored)
    }
}
