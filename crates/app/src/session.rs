//! Routes UI messages to the annotation engine and the announcements desk

use annotation::{AnnotationEngine, DrawMode, EngineEvent, EraserRange, Rect};
use image::RgbaImage;
use planner_config::PlannerConfig;
use planner_ipc::{Bounds, EngineToUi, NoticeLevel, PointerEvent, UiToEngine};
use tracing::debug;

use crate::desk::AnnouncementDesk;

fn draw_mode(mode: planner_ipc::DrawMode) -> DrawMode {
    match mode {
        planner_ipc::DrawMode::Straight => DrawMode::Straight,
        planner_ipc::DrawMode::Freehand => DrawMode::Freehand,
        planner_ipc::DrawMode::Eraser => DrawMode::Eraser,
    }
}

fn bounds(rect: Rect) -> Bounds {
    Bounds {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
    }
}

/// One planner window's worth of state
pub struct PlannerSession {
    engine: AnnotationEngine,
    desk: AnnouncementDesk,
    /// Latest straight-line preview, until the stroke ends
    preview: Option<RgbaImage>,
}

impl PlannerSession {
    pub fn new(engine: AnnotationEngine, desk: AnnouncementDesk) -> Self {
        Self {
            engine,
            desk,
            preview: None,
        }
    }

    /// Apply the eraser settings from configuration and attach the desk
    pub fn from_config(engine: AnnotationEngine, config: &PlannerConfig) -> Self {
        let eraser = &config.eraser;
        let mut engine = engine.with_eraser_range(EraserRange::new(
            eraser.min_radius,
            eraser.max_radius,
            eraser.step,
        ));
        engine.set_eraser_radius(eraser.default_radius as i64);
        Self::new(engine, AnnouncementDesk::from_config(&config.announcements))
    }

    pub fn engine(&self) -> &AnnotationEngine {
        &self.engine
    }

    pub fn desk(&self) -> &AnnouncementDesk {
        &self.desk
    }

    /// What the map view should show: the preview while dragging a line, else the canvas
    pub fn display(&self) -> &RgbaImage {
        self.preview.as_ref().unwrap_or_else(|| self.engine.render())
    }

    pub fn handle(&mut self, msg: UiToEngine) -> Vec<EngineToUi> {
        match msg {
            UiToEngine::SetMode { mode } => {
                self.engine.set_mode(draw_mode(mode));
                Vec::new()
            }
            UiToEngine::SetColor { name } => {
                if self.engine.set_color_by_name(&name) {
                    Vec::new()
                } else {
                    vec![EngineToUi::Notice {
                        level: NoticeLevel::Warning,
                        message: format!("Unknown color: {}", name),
                    }]
                }
            }
            UiToEngine::SetEraserRadius { radius } => {
                let applied = self.engine.set_eraser_radius(radius);
                debug!("Eraser radius {} -> {}", radius, applied);
                Vec::new()
            }
            UiToEngine::Pointer(event) => self.pointer(event),
            UiToEngine::ClearAnnotations => {
                self.preview = None;
                let event = self.engine.clear_annotations();
                self.engine_event(event)
            }
            UiToEngine::Announcement(command) => self.desk.handle(command),
        }
    }

    fn pointer(&mut self, event: PointerEvent) -> Vec<EngineToUi> {
        let (x, y) = event.position();
        let result = match event {
            PointerEvent::Down { .. } => {
                self.preview = None;
                self.engine.on_pointer_down(x, y)
            }
            PointerEvent::Drag { .. } => self.engine.on_pointer_drag(x, y),
            PointerEvent::Up { .. } => {
                self.preview = None;
                self.engine.on_pointer_up(x, y)
            }
        };
        self.engine_event(result)
    }

    fn engine_event(&mut self, event: EngineEvent) -> Vec<EngineToUi> {
        match event {
            EngineEvent::Unchanged => Vec::new(),
            EngineEvent::CanvasChanged { bounds: rect } => {
                self.preview = None;
                vec![EngineToUi::CanvasChanged {
                    bounds: bounds(rect),
                }]
            }
            EngineEvent::PreviewReady(image) => {
                let (width, height) = image.dimensions();
                self.preview = Some(image);
                vec![EngineToUi::PreviewReady { width, height }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use annotation::{BaseMap, PaletteColor};
    use image::Rgba;
    use planner_announcements::{AdminGate, MemoryStore};
    use planner_ipc::AnnouncementCommand;

    use super::*;

    fn session(width: u32, height: u32) -> PlannerSession {
        let base = BaseMap::from_image(RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255])));
        let desk = AnnouncementDesk::new(Box::new(MemoryStore::new()), AdminGate::new("BLUEFALCON"), 3);
        PlannerSession::new(AnnotationEngine::new(base), desk)
    }

    fn pointer(event: PointerEvent) -> UiToEngine {
        UiToEngine::Pointer(event)
    }

    #[test]
    fn test_straight_line_messages() {
        let mut session = session(200, 200);
        session.handle(UiToEngine::SetColor {
            name: "red".to_string(),
        });

        assert!(session.handle(pointer(PointerEvent::Down { x: 100, y: 100 })).is_empty());
        assert_eq!(
            session.handle(pointer(PointerEvent::Drag { x: 150, y: 100 })),
            vec![EngineToUi::PreviewReady {
                width: 200,
                height: 200
            }]
        );
        assert_eq!(
            *session.display().get_pixel(120, 100),
            PaletteColor::Red.rgba()
        );
        assert_ne!(
            *session.engine().render().get_pixel(120, 100),
            PaletteColor::Red.rgba()
        );

        assert_eq!(
            session.handle(pointer(PointerEvent::Up { x: 150, y: 100 })),
            vec![EngineToUi::CanvasChanged {
                bounds: Bounds {
                    x: 99,
                    y: 99,
                    width: 52,
                    height: 2
                }
            }]
        );
        assert_eq!(session.display(), session.engine().render());
    }

    #[test]
    fn test_mode_switch_mid_drag_shows_canvas() {
        let mut session = session(100, 100);
        session.handle(pointer(PointerEvent::Down { x: 10, y: 10 }));
        session.handle(pointer(PointerEvent::Drag { x: 50, y: 10 }));
        assert_ne!(session.display(), session.engine().render());

        session.handle(UiToEngine::SetMode {
            mode: planner_ipc::DrawMode::Freehand,
        });
        let out = session.handle(pointer(PointerEvent::Drag { x: 50, y: 80 }));
        assert!(matches!(out.as_slice(), [EngineToUi::CanvasChanged { .. }]));
        assert_eq!(session.display(), session.engine().render());
    }

    #[test]
    fn test_new_stroke_drops_stale_preview() {
        let mut session = session(100, 100);
        session.handle(pointer(PointerEvent::Down { x: 10, y: 10 }));
        session.handle(pointer(PointerEvent::Drag { x: 60, y: 60 }));

        // No release; the next press starts over
        assert!(session.handle(pointer(PointerEvent::Down { x: 20, y: 20 })).is_empty());
        assert_eq!(session.display(), session.engine().render());
    }

    #[test]
    fn test_unknown_color_warns_and_keeps_color() {
        let mut session = session(10, 10);
        let out = session.handle(UiToEngine::SetColor {
            name: "mauve".to_string(),
        });
        assert_eq!(
            out,
            vec![EngineToUi::Notice {
                level: NoticeLevel::Warning,
                message: "Unknown color: mauve".to_string()
            }]
        );
        assert_eq!(session.engine().color(), PaletteColor::Black);
    }

    #[test]
    fn test_mode_and_radius() {
        let mut session = session(100, 100);
        session.handle(UiToEngine::SetMode {
            mode: planner_ipc::DrawMode::Eraser,
        });
        session.handle(UiToEngine::SetEraserRadius { radius: 33 });
        assert_eq!(session.engine().mode(), DrawMode::Eraser);
        assert_eq!(session.engine().eraser_radius(), 35);
    }

    #[test]
    fn test_clear_annotations() {
        let mut session = session(64, 32);
        session.handle(UiToEngine::SetMode {
            mode: planner_ipc::DrawMode::Freehand,
        });
        session.handle(pointer(PointerEvent::Down { x: 5, y: 5 }));
        session.handle(pointer(PointerEvent::Drag { x: 40, y: 20 }));
        session.handle(pointer(PointerEvent::Up { x: 40, y: 20 }));

        let out = session.handle(UiToEngine::ClearAnnotations);
        assert_eq!(
            out,
            vec![EngineToUi::CanvasChanged {
                bounds: Bounds {
                    x: 0,
                    y: 0,
                    width: 64,
                    height: 32
                }
            }]
        );
        assert_eq!(session.engine().render(), session.engine().base_map().image());
    }

    #[test]
    fn test_announcements_routed_to_desk() {
        let mut session = session(10, 10);
        let out = session.handle(UiToEngine::Announcement(AnnouncementCommand::Refresh));
        let [EngineToUi::AnnouncementsUpdated { slots }] = out.as_slice() else {
            panic!("expected a board update, got {out:?}");
        };
        assert_eq!(slots.len(), 3);
        assert_eq!(session.desk().board().filled_count(), 0);
    }

    #[test]
    fn test_from_config_applies_eraser_settings() {
        let base = BaseMap::from_image(RgbaImage::new(20, 20));
        let mut config = PlannerConfig::default();
        config.eraser.default_radius = 23;

        let session = PlannerSession::from_config(AnnotationEngine::new(base), &config);
        assert_eq!(session.engine().eraser_radius(), 25);
        assert!(!session.desk().store().is_available());
    }
}
