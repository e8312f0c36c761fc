/// Canvas width of the compact map layout.
pub const DEFAULT_CANVAS_WIDTH: u32 = 595;

/// Canvas height of the compact map layout.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 451;

/// Pen width for straight and freehand lines.
pub const LINE_WIDTH: u32 = 2;

/// Smallest eraser half-width.
pub const MIN_ERASER_RADIUS: u32 = 5;

/// Largest eraser half-width.
pub const MAX_ERASER_RADIUS: u32 = 40;

/// Eraser size control granularity (7 steps between min and max).
pub const ERASER_RADIUS_STEP: u32 = 5;

/// Eraser half-width selected at startup.
pub const DEFAULT_ERASER_RADIUS: u32 = 10;

/// Default tile size for dirty tracking.
pub const DEFAULT_TILE_SIZE: u32 = 128;
