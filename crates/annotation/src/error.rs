use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to save canvas to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error(
        "Canvas size mismatch: base map is {expected_width}x{expected_height}, canvas is {width}x{height}"
    )]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
    #[error("Unknown palette color: {0}")]
    UnknownColor(String),
    #[error("Unknown draw mode: {0}")]
    UnknownMode(String),
}
