//! Line and point rasterization with a square pen

use std::ops::RangeInclusive;

use image::Rgba;

use crate::surface::Canvas;
use crate::types::{Point, Rect};

/// Bresenham walk over the integer points of a segment
///
/// State is kept in i64 so endpoints anywhere in the i32 plane are safe.
pub struct LinePoints {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    step_x: i64,
    step_y: i64,
    err: i64,
    done: bool,
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let point = Point::new(self.x as i32, self.y as i32);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(point);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.step_x;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.step_y;
        }
        Some(point)
    }
}

/// Integer points along the segment from `from` to `to`, both endpoints included
///
/// Walked from `from` so the first point is always the anchor.
pub fn line_points(from: Point, to: Point) -> LinePoints {
    let (x0, y0) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    LinePoints {
        x: x0,
        y: y0,
        end_x: x1,
        end_y: y1,
        dx,
        dy,
        step_x: if x0 < x1 { 1 } else { -1 },
        step_y: if y0 < y1 { 1 } else { -1 },
        err: dx + dy,
        done: false,
    }
}

/// Clip a segment to the box `[min, max]` (inclusive on both axes)
///
/// Segments already inside come back unchanged; otherwise the endpoints are
/// moved onto the box edges (Liang-Barsky) and rounded to whole pixels.
fn clip_segment(
    from: Point,
    to: Point,
    min: (i64, i64),
    max: (i64, i64),
) -> Option<(Point, Point)> {
    let inside = |p: Point| {
        (min.0..=max.0).contains(&(p.x as i64)) && (min.1..=max.1).contains(&(p.y as i64))
    };
    if inside(from) && inside(to) {
        return Some((from, to));
    }

    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    let edges = [
        (-dx, x0 - min.0 as f64),
        (dx, max.0 as f64 - x0),
        (-dy, y0 - min.1 as f64),
        (dy, max.1 as f64 - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

/// Pixel offsets covered by a pen of `width` around its center
///
/// Width 1 covers only the center, width 2 extends one pixel up/left.
#[inline]
fn pen_span(width: u32) -> RangeInclusive<i32> {
    let width = width.max(1) as i32;
    let low = -(width / 2);
    low..=low + width - 1
}

/// Tracks the bounding box of pixels written during one draw call
#[derive(Default)]
struct TouchedBounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    any: bool,
}

impl TouchedBounds {
    fn include(&mut self, x: i32, y: i32) {
        let (x, y) = (x as u32, y as u32);
        if !self.any {
            *self = Self {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
                any: true,
            };
            return;
        }
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn into_rect(self) -> Option<Rect> {
        self.any.then(|| {
            Rect::new(
                self.min_x,
                self.min_y,
                self.max_x - self.min_x + 1,
                self.max_y - self.min_y + 1,
            )
        })
    }
}

/// Set a single pixel
///
/// Returns the touched rectangle, or None if `at` is off the canvas.
pub fn draw_point(canvas: &mut Canvas, at: Point, color: Rgba<u8>) -> Option<Rect> {
    canvas
        .set_pixel(at.x, at.y, color)
        .then(|| Rect::new(at.x as u32, at.y as u32, 1, 1))
}

/// Stamp a `width` pen along the segment from `from` to `to`
///
/// Pixels off the canvas are skipped. Returns the bounding box of pixels
/// written, or None if the whole line fell outside.
pub fn draw_line(
    canvas: &mut Canvas,
    from: Point,
    to: Point,
    color: Rgba<u8>,
    width: u32,
) -> Option<Rect> {
    let span = pen_span(width);
    let margin = *span.end() as i64 - *span.start() as i64 + 1;
    let max = (canvas.width() as i64 - 1 + margin, canvas.height() as i64 - 1 + margin);
    let (from, to) = clip_segment(from, to, (-margin, -margin), max)?;

    let mut touched = TouchedBounds::default();
    for center in line_points(from, to) {
        for oy in span.clone() {
            for ox in span.clone() {
                let (x, y) = (center.x + ox, center.y + oy);
                if canvas.set_pixel(x, y, color) {
                    touched.include(x, y);
                }
            }
        }
    }

    touched.into_rect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn test_line_points_horizontal() {
        let points: Vec<Point> = line_points(Point::new(2, 5), Point::new(6, 5)).collect();
        let xs: Vec<i32> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2, 3, 4, 5, 6]);
        assert!(points.iter().all(|p| p.y == 5));
    }

    #[test]
    fn test_line_points_reversed_starts_at_anchor() {
        let points: Vec<Point> = line_points(Point::new(6, 1), Point::new(2, 1)).collect();
        assert_eq!(points.first(), Some(&Point::new(6, 1)));
        assert_eq!(points.last(), Some(&Point::new(2, 1)));
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_line_points_diagonal() {
        let points: Vec<Point> = line_points(Point::new(0, 0), Point::new(3, 3)).collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 2),
                Point::new(3, 3)
            ]
        );
    }

    #[test]
    fn test_line_points_single() {
        assert_eq!(
            line_points(Point::new(4, 4), Point::new(4, 4)).collect::<Vec<_>>(),
            vec![Point::new(4, 4)]
        );
    }

    #[test]
    fn test_line_points_steep_is_connected() {
        let points: Vec<Point> = line_points(Point::new(0, 0), Point::new(2, 9)).collect();
        assert_eq!(points.len(), 10);
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert_eq!(pair[1].y - pair[0].y, 1);
        }
    }

    #[test]
    fn test_pen_span() {
        assert_eq!(pen_span(1), 0..=0);
        assert_eq!(pen_span(2), -1..=0);
        assert_eq!(pen_span(3), -1..=1);
        assert_eq!(pen_span(0), 0..=0);
    }

    #[test]
    fn test_draw_point() {
        let mut canvas = Canvas::new(10, 10);
        assert_eq!(
            draw_point(&mut canvas, Point::new(3, 4), RED),
            Some(Rect::new(3, 4, 1, 1))
        );
        assert_eq!(canvas.get_pixel(3, 4), Some(RED));
        assert_eq!(draw_point(&mut canvas, Point::new(-1, 4), RED), None);
    }

    #[test]
    fn test_draw_line_width_two() {
        let mut canvas = Canvas::new(20, 20);
        let bounds = draw_line(&mut canvas, Point::new(5, 10), Point::new(10, 10), RED, 2);

        assert_eq!(bounds, Some(Rect::new(4, 9, 7, 2)));
        for x in 4..=10 {
            assert_eq!(canvas.get_pixel(x, 9), Some(RED));
            assert_eq!(canvas.get_pixel(x, 10), Some(RED));
        }
        assert_eq!(canvas.get_pixel(5, 11), Some(CLEAR));
        assert_eq!(canvas.get_pixel(11, 10), Some(CLEAR));
    }

    #[test]
    fn test_draw_line_touches_only_bounds() {
        let mut canvas = Canvas::new(32, 32);
        let bounds = draw_line(&mut canvas, Point::new(3, 20), Point::new(25, 4), RED, 2).unwrap();

        for y in 0..32 {
            for x in 0..32 {
                if !bounds.contains(x, y) {
                    assert_eq!(canvas.get_pixel(x, y), Some(CLEAR), "pixel ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_draw_line_clipped() {
        let mut canvas = Canvas::new(10, 10);
        let bounds = draw_line(&mut canvas, Point::new(-5, 0), Point::new(3, 0), RED, 2);
        assert_eq!(bounds, Some(Rect::new(0, 0, 4, 1)));

        let outside = draw_line(&mut canvas, Point::new(-5, -5), Point::new(-1, -9), RED, 2);
        assert_eq!(outside, None);
    }

    #[test]
    fn test_line_points_extreme_endpoints() {
        let points = line_points(Point::new(i32::MIN, 0), Point::new(i32::MIN + 2, 1));
        assert_eq!(points.count(), 3);
    }

    #[test]
    fn test_draw_line_far_endpoints() {
        let mut canvas = Canvas::new(10, 10);
        let bounds = draw_line(
            &mut canvas,
            Point::new(-2_000_000_000, 5),
            Point::new(2_000_000_000, 5),
            RED,
            2,
        );
        assert_eq!(bounds, Some(Rect::new(0, 4, 10, 2)));
        assert_eq!(canvas.get_pixel(0, 5), Some(RED));
        assert_eq!(canvas.get_pixel(9, 4), Some(RED));
        assert_eq!(canvas.get_pixel(5, 6), Some(CLEAR));
    }

    #[test]
    fn test_draw_line_far_diagonal_crosses_canvas() {
        let mut canvas = Canvas::new(20, 20);
        let bounds = draw_line(
            &mut canvas,
            Point::new(-1_000_000_000, -1_000_000_000),
            Point::new(1_000_000_000, 1_000_000_000),
            RED,
            2,
        );
        assert_eq!(bounds, Some(Rect::new(0, 0, 20, 20)));
        assert_eq!(canvas.get_pixel(10, 10), Some(RED));
        assert_eq!(canvas.get_pixel(19, 0), Some(CLEAR));

        let missed = draw_line(
            &mut canvas,
            Point::new(-1_000_000_000, 50),
            Point::new(1_000_000_000, 50),
            RED,
            2,
        );
        assert_eq!(missed, None);
    }
}
