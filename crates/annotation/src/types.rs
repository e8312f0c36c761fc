use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnnotationError;

/// How pointer events are turned into canvas changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Preview while dragging, commit one line on release
    #[default]
    Straight,
    /// Draw directly into the canvas on every drag event
    Freehand,
    /// Restore base map pixels under the pointer
    Eraser,
}

impl DrawMode {
    pub const ALL: [DrawMode; 3] = [DrawMode::Straight, DrawMode::Freehand, DrawMode::Eraser];

    pub fn as_str(self) -> &'static str {
        match self {
            DrawMode::Straight => "straight",
            DrawMode::Freehand => "freehand",
            DrawMode::Eraser => "eraser",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        DrawMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| AnnotationError::UnknownMode(name.to_string()))
    }
}

/// Pointer position in canvas pixels
///
/// Signed because pointer events can land outside the canvas while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle inside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clip the half-open box `[x0, x1) x [y0, y1)` to a `width` x `height` surface.
    ///
    /// Returns None when nothing of the box lies on the surface.
    pub fn clipped(x0: i64, y0: i64, x1: i64, y1: i64, width: u32, height: u32) -> Option<Self> {
        let left = x0.max(0);
        let top = y0.max(0);
        let right = x1.min(width as i64);
        let bottom = y1.min(height as i64);

        if left >= right || top >= bottom {
            return None;
        }

        Some(Self {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_mode_parse() {
        assert_eq!("straight".parse::<DrawMode>().unwrap(), DrawMode::Straight);
        assert_eq!(" Freehand ".parse::<DrawMode>().unwrap(), DrawMode::Freehand);
        assert_eq!("ERASER".parse::<DrawMode>().unwrap(), DrawMode::Eraser);
        assert!(matches!(
            "spray".parse::<DrawMode>(),
            Err(AnnotationError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_draw_mode_default_is_straight() {
        assert_eq!(DrawMode::default(), DrawMode::Straight);
    }

    #[test]
    fn test_rect_clipped_inside() {
        let rect = Rect::clipped(10, 20, 30, 40, 100, 100).unwrap();
        assert_eq!(rect, Rect::new(10, 20, 20, 20));
    }

    #[test]
    fn test_rect_clipped_at_edges() {
        // Box hanging off the top-left corner
        let rect = Rect::clipped(-5, -5, 5, 5, 100, 100).unwrap();
        assert_eq!(rect, Rect::new(0, 0, 5, 5));

        // Box hanging off the bottom-right corner
        let rect = Rect::clipped(95, 90, 105, 110, 100, 100).unwrap();
        assert_eq!(rect, Rect::new(95, 90, 5, 10));
    }

    #[test]
    fn test_rect_clipped_outside() {
        assert_eq!(Rect::clipped(-20, -20, -10, -10, 100, 100), None);
        assert_eq!(Rect::clipped(100, 0, 110, 10, 100, 100), None);
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 5, 5, 20);
        assert_eq!(a.union(&b), Rect::new(0, 0, 25, 25));
        assert_eq!(Rect::new(0, 0, 0, 0).union(&b), b);
    }
}
