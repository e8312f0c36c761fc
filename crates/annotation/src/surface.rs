//! Canvas and base map surfaces - RGBA8 storage
//!
//! The [`Canvas`] holds the map plus every annotation drawn so far and is
//! mutated in place. The [`BaseMap`] is the untouched map image, loaded once
//! and shared read-only; the eraser copies pixels back from it.

use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::{debug, info};

use crate::error::AnnotationError;
use crate::types::Rect;

/// Bytes per RGBA8 pixel
const BYTES_PER_PIXEL: usize = 4;

/// Open an image file and resize it to exactly `width` x `height`
fn load_resized(path: &Path, width: u32, height: u32) -> Result<RgbaImage, AnnotationError> {
    if width == 0 || height == 0 {
        return Err(AnnotationError::InvalidDimensions { width, height });
    }

    let decoded = image::open(path).map_err(|source| AnnotationError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    if decoded.width() == width && decoded.height() == height {
        return Ok(decoded.to_rgba8());
    }

    debug!(
        "Resizing {:?} from {}x{} to {}x{}",
        path,
        decoded.width(),
        decoded.height(),
        width,
        height
    );
    Ok(decoded
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgba8())
}

/// The persistent annotated image
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a new canvas with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Wrap an existing image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Load a previously saved canvas, resized to the given dimensions
    pub fn load(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Self, AnnotationError> {
        let path = path.as_ref();
        let image = load_resized(path, width, height)?;
        info!("Loaded canvas from {:?} ({}x{})", path, width, height);
        Ok(Self { image })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Rectangle covering the whole canvas
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Set a pixel at signed coordinates
    /// Returns false (and does nothing) if the coordinates are off the canvas
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return false;
        }
        self.image.put_pixel(x as u32, y as u32, color);
        true
    }

    /// Fill the whole canvas with one color
    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Copy `rect` from `source` into the same position on this canvas
    ///
    /// `source` must have the canvas dimensions; the rectangle is clamped to bounds.
    /// Returns the rectangle actually copied.
    pub fn copy_region_from(&mut self, source: &RgbaImage, rect: Rect) -> Option<Rect> {
        if source.dimensions() != self.image.dimensions() {
            debug!(
                "copy_region_from: source {:?} does not match canvas {:?}",
                source.dimensions(),
                self.image.dimensions()
            );
            return None;
        }

        let rect = Rect::clipped(
            rect.x as i64,
            rect.y as i64,
            rect.right() as i64,
            rect.bottom() as i64,
            self.width(),
            self.height(),
        )?;

        let stride = self.width() as usize * BYTES_PER_PIXEL;
        let row_len = rect.width as usize * BYTES_PER_PIXEL;
        let src: &[u8] = source;
        let dst: &mut [u8] = &mut self.image;

        for row in rect.y..rect.bottom() {
            let start = row as usize * stride + rect.x as usize * BYTES_PER_PIXEL;
            dst[start..start + row_len].copy_from_slice(&src[start..start + row_len]);
        }

        Some(rect)
    }

    /// Get pixel data for a rectangular region as packed RGBA8 rows
    /// The region is clamped to canvas bounds
    pub fn region_bytes(&self, rect: Rect) -> Vec<u8> {
        let Some(rect) = Rect::clipped(
            rect.x as i64,
            rect.y as i64,
            rect.right() as i64,
            rect.bottom() as i64,
            self.width(),
            self.height(),
        ) else {
            return Vec::new();
        };

        let stride = self.width() as usize * BYTES_PER_PIXEL;
        let row_len = rect.width as usize * BYTES_PER_PIXEL;
        let src: &[u8] = &self.image;

        let mut data = Vec::with_capacity(row_len * rect.height as usize);
        for row in rect.y..rect.bottom() {
            let start = row as usize * stride + rect.x as usize * BYTES_PER_PIXEL;
            data.extend_from_slice(&src[start..start + row_len]);
        }
        data
    }

    /// Raw RGBA8 bytes for display upload
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Write the canvas as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), AnnotationError> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| AnnotationError::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Saved canvas to {:?}", path);
        Ok(())
    }
}

/// The original, unannotated map
///
/// Immutable after load; clones share the same pixel buffer.
#[derive(Debug, Clone)]
pub struct BaseMap {
    image: Arc<RgbaImage>,
}

impl BaseMap {
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Load the map from disk, resized to the canvas dimensions
    pub fn load(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Self, AnnotationError> {
        let path = path.as_ref();
        let image = load_resized(path, width, height)?;
        info!("Loaded base map from {:?} ({}x{})", path, width, height);
        Ok(Self::from_image(image))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// A fresh canvas showing the map with no annotations
    pub fn to_canvas(&self) -> Canvas {
        Canvas::from_image(self.image.as_ref().clone())
    }
}
