//! Dirty tile tracking for incremental updates

use tracing::debug;

use super::{TileCoord, TiledCanvas};
use crate::types::Rect;

impl TiledCanvas {
    /// Mark a pixel as modified (marks containing tile dirty)
    #[inline]
    pub fn mark_dirty(&mut self, x: u32, y: u32) {
        if x >= self.canvas.width() || y >= self.canvas.height() {
            return;
        }
        self.dirty_tiles.insert(TileCoord {
            x: x / self.tile_size,
            y: y / self.tile_size,
        });
    }

    /// Mark a rectangular region as dirty
    pub fn mark_region_dirty(&mut self, rect: Rect) {
        if rect.is_empty() || rect.x >= self.canvas.width() || rect.y >= self.canvas.height() {
            return;
        }

        // Clamp to canvas bounds
        let x_end = rect.right().min(self.canvas.width());
        let y_end = rect.bottom().min(self.canvas.height());

        let tile_x_start = rect.x / self.tile_size;
        let tile_y_start = rect.y / self.tile_size;
        let tile_x_end = (x_end - 1) / self.tile_size;
        let tile_y_end = (y_end - 1) / self.tile_size;

        let tiles_before = self.dirty_tiles.len();

        for ty in tile_y_start..=tile_y_end {
            for tx in tile_x_start..=tile_x_end {
                self.dirty_tiles.insert(TileCoord { x: tx, y: ty });
            }
        }

        debug!(
            "mark_region_dirty: {:?} -> {} new tiles (total {})",
            rect,
            self.dirty_tiles.len() - tiles_before,
            self.dirty_tiles.len()
        );
    }

    /// Mark every tile dirty (after a full-canvas change)
    pub fn mark_all_dirty(&mut self) {
        let bounds = self.canvas.bounds();
        self.mark_region_dirty(bounds);
    }

    /// Get all dirty tiles in row-major order and clear the dirty set
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        let mut tiles: Vec<TileCoord> = self.dirty_tiles.drain().collect();
        tiles.sort_by_key(|t| (t.y, t.x));
        tiles
    }

    #[inline]
    pub fn has_dirty_tiles(&self) -> bool {
        !self.dirty_tiles.is_empty()
    }

    #[inline]
    pub fn dirty_tile_count(&self) -> usize {
        self.dirty_tiles.len()
    }
}
