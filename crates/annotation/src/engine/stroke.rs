//! Pointer handling for the annotation engine

use tracing::debug;

use super::{AnnotationEngine, EngineEvent};
use crate::constants::LINE_WIDTH;
use crate::types::{DrawMode, Point};

impl AnnotationEngine {
    /// Begin a stroke at (x, y)
    ///
    /// Freehand marks a single pixel and eraser restores under the brush
    /// immediately; straight mode only records the anchor.
    pub fn on_pointer_down(&mut self, x: i32, y: i32) -> EngineEvent {
        let at = Point::new(x, y);
        self.stroke = Some(at);

        match self.mode {
            DrawMode::Straight => EngineEvent::Unchanged,
            DrawMode::Freehand => {
                let color = self.color.rgba();
                EngineEvent::changed(self.surface.draw_point(at, color))
            }
            DrawMode::Eraser => EngineEvent::changed(self.erase(at)),
        }
    }

    /// Continue the active stroke to (x, y)
    ///
    /// Without an active stroke this does nothing. Straight mode returns a
    /// preview and keeps the anchor where the stroke began; freehand and
    /// eraser mutate the canvas and move the anchor to (x, y).
    pub fn on_pointer_drag(&mut self, x: i32, y: i32) -> EngineEvent {
        let Some(anchor) = self.stroke else {
            debug!("on_pointer_drag: no active stroke, ignoring");
            return EngineEvent::Unchanged;
        };
        let to = Point::new(x, y);

        match self.mode {
            DrawMode::Straight => EngineEvent::PreviewReady(self.preview_line(anchor, to)),
            DrawMode::Freehand => {
                let color = self.color.rgba();
                let touched = self.surface.draw_line(anchor, to, color, LINE_WIDTH);
                self.stroke = Some(to);
                EngineEvent::changed(touched)
            }
            DrawMode::Eraser => {
                let restored = self.erase(to);
                self.stroke = Some(to);
                EngineEvent::changed(restored)
            }
        }
    }

    /// End the active stroke at (x, y)
    ///
    /// Straight mode commits one line from the anchor; other modes already
    /// applied their changes. The stroke is over either way.
    pub fn on_pointer_up(&mut self, x: i32, y: i32) -> EngineEvent {
        let Some(anchor) = self.stroke.take() else {
            debug!("on_pointer_up: no active stroke, ignoring");
            return EngineEvent::Unchanged;
        };

        match self.mode {
            DrawMode::Straight => EngineEvent::changed(self.commit_line(anchor, Point::new(x, y))),
            DrawMode::Freehand | DrawMode::Eraser => EngineEvent::Unchanged,
        }
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::super::test_support::*;
    use crate::engine::EngineEvent;
    use crate::palette::PaletteColor;
    use crate::types::{DrawMode, Point, Rect};

    #[test]
    fn test_straight_line_scenario() {
        let mut engine = engine(200, 200);
        engine.set_color(PaletteColor::Red);
        let before = engine.render().clone();

        assert_eq!(engine.on_pointer_down(100, 100), EngineEvent::Unchanged);
        assert!(engine.is_stroking());

        let event = engine.on_pointer_drag(150, 100);
        let EngineEvent::PreviewReady(preview) = event else {
            panic!("expected preview, got {event:?}");
        };
        assert_eq!(preview.dimensions(), (200, 200));
        assert_eq!(*preview.get_pixel(125, 100), PaletteColor::Red.rgba());
        assert_eq!(engine.render(), &before);
        assert!(!engine.has_dirty_tiles());

        let event = engine.on_pointer_up(150, 100);
        assert_eq!(
            event,
            EngineEvent::CanvasChanged {
                bounds: Rect::new(99, 99, 52, 2)
            }
        );
        assert!(!engine.is_stroking());

        let red = Some(PaletteColor::Red.rgba());
        for x in 100..=150 {
            assert_eq!(engine.canvas().get_pixel(x, 100), red, "x = {x}");
            assert_eq!(engine.canvas().get_pixel(x, 99), red, "x = {x}");
        }
        assert_eq!(
            engine.canvas().get_pixel(125, 101),
            engine.base_map().get_pixel(125, 101)
        );
        assert_eq!(engine.render(), &preview);
    }

    #[test]
    fn test_previews_never_mutate_canvas() {
        let mut engine = engine(120, 120);
        let before = engine.render().clone();

        engine.on_pointer_down(10, 10);
        for i in 0..25 {
            let event = engine.on_pointer_drag(20 + i * 3, 100 - i * 2);
            assert!(matches!(event, EngineEvent::PreviewReady(_)));
        }

        assert_eq!(engine.render(), &before);
        assert_eq!(engine.stroke_anchor(), Some(Point::new(10, 10)));
    }

    #[test]
    fn test_commit_uses_anchor_not_drag_path() {
        let mut engine = engine(200, 200);
        engine.set_color(PaletteColor::Green);

        engine.on_pointer_down(100, 100);
        engine.on_pointer_drag(100, 180);
        engine.on_pointer_drag(30, 30);
        let last_preview = match engine.on_pointer_drag(150, 100) {
            EngineEvent::PreviewReady(image) => image,
            other => panic!("expected preview, got {other:?}"),
        };
        engine.on_pointer_up(150, 100);

        // Only the final segment landed
        assert_eq!(engine.render(), &last_preview);
        assert_eq!(
            engine.canvas().get_pixel(100, 150),
            engine.base_map().get_pixel(100, 150)
        );
        assert_eq!(
            engine.canvas().get_pixel(50, 50),
            engine.base_map().get_pixel(50, 50)
        );
    }

    #[test]
    fn test_freehand_down_marks_single_pixel() {
        let mut engine = engine(50, 50);
        engine.set_mode(DrawMode::Freehand);
        engine.set_color(PaletteColor::White);
        let before = engine.render().clone();

        let event = engine.on_pointer_down(7, 9);
        assert_eq!(
            event,
            EngineEvent::CanvasChanged {
                bounds: Rect::new(7, 9, 1, 1)
            }
        );
        assert_eq!(changed_pixels(&before, engine.render()), vec![(7, 9)]);
    }

    #[test]
    fn test_freehand_drag_moves_anchor() {
        let mut engine = engine(100, 100);
        engine.set_mode(DrawMode::Freehand);
        engine.set_color(PaletteColor::Blue);

        engine.on_pointer_down(10, 10);
        let event = engine.on_pointer_drag(30, 10);
        assert_eq!(
            event,
            EngineEvent::CanvasChanged {
                bounds: Rect::new(9, 9, 22, 2)
            }
        );
        assert_eq!(engine.stroke_anchor(), Some(Point::new(30, 10)));

        engine.on_pointer_drag(30, 40);
        let blue = Some(PaletteColor::Blue.rgba());
        assert_eq!(engine.canvas().get_pixel(30, 25), blue);
        assert_eq!(engine.on_pointer_up(30, 40), EngineEvent::Unchanged);
    }

    #[test]
    fn test_freehand_changes_only_touched_pixels() {
        let mut engine = engine(80, 80);
        engine.set_mode(DrawMode::Freehand);
        engine.set_color(PaletteColor::Red);

        let path = [(5, 5), (40, 12), (70, 60), (20, 75), (21, 74)];
        let mut previous = engine.render().clone();
        engine.on_pointer_down(path[0].0, path[0].1);

        for &(x, y) in &path[1..] {
            let EngineEvent::CanvasChanged { bounds } = engine.on_pointer_drag(x, y) else {
                panic!("freehand drag inside canvas must change it");
            };
            for (px, py) in changed_pixels(&previous, engine.render()) {
                assert!(bounds.contains(px, py), "({px}, {py}) outside {bounds:?}");
                assert_eq!(
                    engine.canvas().get_pixel(px, py),
                    Some(PaletteColor::Red.rgba())
                );
            }
            previous = engine.render().clone();
        }
    }

    #[test]
    fn test_no_active_stroke_is_noop() {
        let mut engine = engine(40, 40);
        let before = engine.render().clone();

        for mode in DrawMode::ALL {
            engine.set_mode(mode);
            assert_eq!(engine.on_pointer_drag(10, 10), EngineEvent::Unchanged);
            assert_eq!(engine.on_pointer_up(10, 10), EngineEvent::Unchanged);
        }
        assert_eq!(engine.render(), &before);
    }

    #[test]
    fn test_pointer_up_ends_stroke() {
        let mut engine = engine(40, 40);
        engine.set_mode(DrawMode::Freehand);
        engine.on_pointer_down(5, 5);
        engine.on_pointer_up(5, 5);

        let before = engine.render().clone();
        assert_eq!(engine.on_pointer_drag(30, 30), EngineEvent::Unchanged);
        assert_eq!(engine.render(), &before);
    }

    #[test]
    fn test_missed_pointer_up_keeps_stale_anchor() {
        let mut engine = engine(60, 60);
        engine.set_mode(DrawMode::Freehand);
        engine.on_pointer_down(5, 5);
        engine.on_pointer_drag(10, 5);

        // Pointer left the view without a release; the next drag continues from the old anchor
        assert_eq!(engine.stroke_anchor(), Some(Point::new(10, 5)));
        assert!(engine.on_pointer_drag(50, 50).is_canvas_changed());
    }

    #[test]
    fn test_mode_switch_mid_gesture() {
        let mut engine = engine(120, 120);
        engine.set_color(PaletteColor::Red);

        // Commit a line first
        engine.on_pointer_down(10, 100);
        engine.on_pointer_up(110, 100);
        let committed: RgbaImage = engine.render().clone();

        // Start a straight stroke, switch to eraser, then drag
        engine.on_pointer_down(10, 10);
        engine.set_mode(DrawMode::Eraser);
        engine.set_eraser_radius(5);
        let event = engine.on_pointer_drag(60, 60);
        assert_eq!(
            event,
            EngineEvent::CanvasChanged {
                bounds: Rect::new(55, 55, 10, 10)
            }
        );

        // The committed line is untouched by the eraser far away
        let red = Some(PaletteColor::Red.rgba());
        assert_eq!(engine.canvas().get_pixel(60, 100), red);
        for (x, y) in changed_pixels(&committed, engine.render()) {
            assert!((55..65).contains(&x) && (55..65).contains(&y));
        }

        // Releasing in eraser mode commits nothing more
        let before_up = engine.render().clone();
        assert_eq!(engine.on_pointer_up(60, 60), EngineEvent::Unchanged);
        assert_eq!(engine.render(), &before_up);
    }

    #[test]
    fn test_switch_to_straight_commits_from_last_anchor() {
        let mut engine = engine(100, 100);
        engine.set_mode(DrawMode::Freehand);
        engine.on_pointer_down(10, 10);
        engine.on_pointer_drag(20, 10);

        engine.set_mode(DrawMode::Straight);
        let event = engine.on_pointer_up(20, 50);
        assert_eq!(
            event,
            EngineEvent::CanvasChanged {
                bounds: Rect::new(19, 9, 2, 42)
            }
        );
    }

    #[test]
    fn test_stroke_outside_canvas() {
        let mut engine = engine(50, 50);
        engine.set_mode(DrawMode::Freehand);
        assert_eq!(engine.on_pointer_down(-10, -10), EngineEvent::Unchanged);
        assert_eq!(engine.on_pointer_drag(-20, -5), EngineEvent::Unchanged);
        assert!(engine.on_pointer_drag(10, 10).is_canvas_changed());
    }
}
