//! Tile management and dirty tracking for the canvas

mod data_access;
mod dirty_tracking;
mod stroke_application;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TILE_SIZE;
use crate::surface::Canvas;

/// Tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

/// Wraps a canvas and records which tiles changed since the last upload
pub struct TiledCanvas {
    pub(crate) canvas: Canvas,
    pub(crate) tile_size: u32,
    tiles_x: u32,
    tiles_y: u32,
    pub(crate) dirty_tiles: HashSet<TileCoord>,
}

impl TiledCanvas {
    /// Wrap a canvas with the given tile size
    pub fn new(canvas: Canvas, tile_size: u32) -> Self {
        let tile_size = tile_size.max(1);
        let tiles_x = canvas.width().div_ceil(tile_size);
        let tiles_y = canvas.height().div_ceil(tile_size);

        Self {
            canvas,
            tile_size,
            tiles_x,
            tiles_y,
            dirty_tiles: HashSet::new(),
        }
    }

    /// Wrap a canvas with the default tile size
    pub fn with_default_tile_size(canvas: Canvas) -> Self {
        Self::new(canvas, DEFAULT_TILE_SIZE)
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    #[inline]
    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    /// Get the underlying canvas for direct pixel access
    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}
