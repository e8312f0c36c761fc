//! Tile data access and region queries

use super::{TileCoord, TiledCanvas};
use crate::types::Rect;

impl TiledCanvas {
    /// Get tile pixels as packed RGBA8 rows
    /// Edge tiles are smaller than `tile_size`
    pub fn get_tile_data(&self, coord: TileCoord) -> Vec<u8> {
        self.canvas.region_bytes(self.get_tile_bounds(coord))
    }

    /// Get tile bounds in pixel coordinates
    pub fn get_tile_bounds(&self, coord: TileCoord) -> Rect {
        let tile_start_x = coord.x * self.tile_size;
        let tile_start_y = coord.y * self.tile_size;

        let tile_width = self
            .tile_size
            .min(self.canvas.width().saturating_sub(tile_start_x));
        let tile_height = self
            .tile_size
            .min(self.canvas.height().saturating_sub(tile_start_y));

        Rect::new(tile_start_x, tile_start_y, tile_width, tile_height)
    }

    /// Get pixel data for a rectangular region, clamped to canvas bounds
    pub fn get_region_data(&self, rect: Rect) -> Vec<u8> {
        self.canvas.region_bytes(rect)
    }

    /// Compute bounding box of given tiles in pixel coordinates
    /// Returns None if no tiles are provided
    pub fn compute_tiles_bounding_box(&self, tiles: &[TileCoord]) -> Option<Rect> {
        tiles
            .iter()
            .map(|tile| self.get_tile_bounds(*tile))
            .filter(|bounds| !bounds.is_empty())
            .reduce(|acc, bounds| acc.union(&bounds))
    }
}
