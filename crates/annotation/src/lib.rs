//! Mission planner annotation system - raster strokes over a base map
//!
//! This crate provides the drawing engine behind the map view:
//! - [`engine`] - [`AnnotationEngine`], driven by pointer down/drag/up events
//! - [`surface`] - The mutable [`Canvas`] and the read-only [`BaseMap`]
//! - [`raster`] - Line and point rasterization with a square pen
//! - [`tiles`] - Tile management with dirty tracking for incremental display
//! - [`palette`] - The fixed stroke color palette
//! - [`types`] - Draw modes, points and pixel rectangles
//! - [`validation`] - Eraser radius bounds

pub mod constants;
pub mod engine;
pub mod error;
pub mod palette;
pub mod raster;
pub mod surface;
pub mod tiles;
pub mod types;
pub mod validation;

pub use constants::*;
pub use engine::*;
pub use error::*;
pub use palette::*;
pub use raster::*;
pub use surface::*;
pub use tiles::*;
pub use types::*;
pub use validation::*;
