//! Raster annotation engine
//!
//! This module connects:
//! - Pointer input (`on_pointer_down`, `on_pointer_drag`, `on_pointer_up`)
//! - The current tool state (draw mode, palette color, eraser radius)
//! - The tiled canvas (line/point drawing, eraser restore)
//! - The read-only base map the eraser restores from
//!
//! Every pointer call returns an [`EngineEvent`] telling the UI layer what to
//! redraw. The engine has no UI dependency and runs wherever its owner runs.

mod erase;
mod preview;
mod stroke;

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info};

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_ERASER_RADIUS};
use crate::error::AnnotationError;
use crate::palette::PaletteColor;
use crate::surface::{BaseMap, Canvas};
use crate::tiles::{TileCoord, TiledCanvas};
use crate::types::{DrawMode, Point, Rect};
use crate::validation::EraserRange;

/// What a pointer event did
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Nothing to redraw
    Unchanged,
    /// The canvas was mutated inside `bounds`
    CanvasChanged { bounds: Rect },
    /// A throwaway straight-line preview to display instead of the canvas
    PreviewReady(RgbaImage),
}

impl EngineEvent {
    /// Wrap an optional touched rectangle
    pub(crate) fn changed(bounds: Option<Rect>) -> Self {
        match bounds {
            Some(bounds) => EngineEvent::CanvasChanged { bounds },
            None => EngineEvent::Unchanged,
        }
    }

    pub fn is_canvas_changed(&self) -> bool {
        matches!(self, EngineEvent::CanvasChanged { .. })
    }
}

/// Annotation engine for one map view
///
/// Owns the canvas exclusively. Pointer coordinates are canvas pixels.
pub struct AnnotationEngine {
    /// Canvas with dirty tracking
    pub(crate) surface: TiledCanvas,
    /// Untouched map, source for the eraser
    pub(crate) base: BaseMap,
    /// Current draw mode
    pub(crate) mode: DrawMode,
    /// Current stroke color
    pub(crate) color: PaletteColor,
    /// Current eraser half-width
    pub(crate) eraser_radius: u32,
    /// Allowed eraser half-widths
    pub(crate) eraser_range: EraserRange,
    /// Last recorded pointer position of the active stroke (None between strokes)
    pub(crate) stroke: Option<Point>,
}

impl AnnotationEngine {
    /// Create an engine whose canvas starts as a copy of the base map
    pub fn new(base: BaseMap) -> Self {
        let canvas = base.to_canvas();
        Self::assemble(base, canvas)
    }

    /// Create an engine from a base map and a previously annotated canvas
    pub fn with_canvas(base: BaseMap, canvas: Canvas) -> Result<Self, AnnotationError> {
        if canvas.width() != base.width() || canvas.height() != base.height() {
            return Err(AnnotationError::SizeMismatch {
                expected_width: base.width(),
                expected_height: base.height(),
                width: canvas.width(),
                height: canvas.height(),
            });
        }
        Ok(Self::assemble(base, canvas))
    }

    /// Load the base map (and optionally a saved canvas) from disk
    ///
    /// Both images are resized to `width` x `height`. A missing or corrupt
    /// image is fatal.
    pub fn open(
        map_path: impl AsRef<Path>,
        canvas_path: Option<&Path>,
        width: u32,
        height: u32,
    ) -> Result<Self, AnnotationError> {
        let base = BaseMap::load(map_path, width, height)?;
        match canvas_path {
            Some(path) => Self::with_canvas(base, Canvas::load(path, width, height)?),
            None => Ok(Self::new(base)),
        }
    }

    /// Load the base map at the compact 595x451 layout
    pub fn open_default(map_path: impl AsRef<Path>) -> Result<Self, AnnotationError> {
        Self::open(map_path, None, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }

    fn assemble(base: BaseMap, canvas: Canvas) -> Self {
        info!(
            "Annotation engine ready ({}x{})",
            canvas.width(),
            canvas.height()
        );
        Self {
            surface: TiledCanvas::with_default_tile_size(canvas),
            base,
            mode: DrawMode::default(),
            color: PaletteColor::default(),
            eraser_radius: DEFAULT_ERASER_RADIUS,
            eraser_range: EraserRange::default(),
            stroke: None,
        }
    }

    /// Replace the allowed eraser range; the current radius is re-normalized
    pub fn with_eraser_range(mut self, range: EraserRange) -> Self {
        self.eraser_range = range;
        self.eraser_radius = range.normalize(self.eraser_radius as i64);
        self
    }

    pub fn width(&self) -> u32 {
        self.surface.canvas().width()
    }

    pub fn height(&self) -> u32 {
        self.surface.canvas().height()
    }

    /// Set the draw mode
    pub fn set_mode(&mut self, mode: DrawMode) {
        debug!("Draw mode: {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Set the stroke color
    pub fn set_color(&mut self, color: PaletteColor) {
        self.color = color;
    }

    /// Set the stroke color by palette name
    ///
    /// Unknown names leave the color unchanged and return false.
    pub fn set_color_by_name(&mut self, name: &str) -> bool {
        match PaletteColor::from_name(name) {
            Some(color) => {
                self.set_color(color);
                true
            }
            None => {
                debug!("Ignoring unknown palette color {:?}", name);
                false
            }
        }
    }

    pub fn color(&self) -> PaletteColor {
        self.color
    }

    /// Set the eraser half-width, clamped and snapped to the allowed range
    ///
    /// Returns the radius actually applied.
    pub fn set_eraser_radius(&mut self, value: i64) -> u32 {
        self.eraser_radius = self.eraser_range.normalize(value);
        self.eraser_radius
    }

    pub fn eraser_radius(&self) -> u32 {
        self.eraser_radius
    }

    pub fn eraser_range(&self) -> EraserRange {
        self.eraser_range
    }

    /// Anchor of the active stroke, if any
    pub fn stroke_anchor(&self) -> Option<Point> {
        self.stroke
    }

    /// The canvas as it should be displayed
    pub fn render(&self) -> &RgbaImage {
        self.surface.canvas().image()
    }

    pub fn canvas(&self) -> &Canvas {
        self.surface.canvas()
    }

    pub fn base_map(&self) -> &BaseMap {
        &self.base
    }

    /// Take tiles modified since the last call
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        self.surface.take_dirty_tiles()
    }

    pub fn has_dirty_tiles(&self) -> bool {
        self.surface.has_dirty_tiles()
    }

    /// Packed RGBA8 pixels of one tile
    pub fn get_tile_data(&self, coord: TileCoord) -> Vec<u8> {
        self.surface.get_tile_data(coord)
    }

    pub fn get_tile_bounds(&self, coord: TileCoord) -> Rect {
        self.surface.get_tile_bounds(coord)
    }

    /// Bounding box of the given tiles, for a single partial upload
    pub fn compute_tiles_bounding_box(&self, tiles: &[TileCoord]) -> Option<Rect> {
        self.surface.compute_tiles_bounding_box(tiles)
    }

    /// Restore the whole canvas from the base map
    pub fn clear_annotations(&mut self) -> EngineEvent {
        let bounds = self.surface.canvas().bounds();
        let restored = self.surface.restore_region(self.base.image(), bounds);
        info!("Cleared all annotations");
        EngineEvent::changed(restored)
    }

    /// Write the current canvas as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), AnnotationError> {
        self.surface.canvas().save_png(path)
    }
}
