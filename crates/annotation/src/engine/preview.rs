//! Straight-line preview and commit

use image::RgbaImage;

use super::AnnotationEngine;
use crate::constants::LINE_WIDTH;
use crate::raster;
use crate::surface::Canvas;
use crate::types::{Point, Rect};

impl AnnotationEngine {
    /// Render the canvas with a line from `from` to `to` on a throwaway copy
    ///
    /// The canvas itself is not touched and no tiles are marked dirty.
    pub fn preview_line(&self, from: Point, to: Point) -> RgbaImage {
        let mut preview = Canvas::from_image(self.surface.canvas().image().clone());
        raster::draw_line(&mut preview, from, to, self.color.rgba(), LINE_WIDTH);
        preview.into_image()
    }

    /// Draw a line from `from` to `to` into the canvas
    pub(crate) fn commit_line(&mut self, from: Point, to: Point) -> Option<Rect> {
        let color = self.color.rgba();
        self.surface.draw_line(from, to, color, LINE_WIDTH)
    }
}
