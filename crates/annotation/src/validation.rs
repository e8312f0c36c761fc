use serde::{Deserialize, Serialize};

use crate::constants::{ERASER_RADIUS_STEP, MAX_ERASER_RADIUS, MIN_ERASER_RADIUS};

/// Allowed eraser half-widths
///
/// Mirrors the size slider: a closed range walked in fixed steps from `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraserRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for EraserRange {
    fn default() -> Self {
        Self {
            min: MIN_ERASER_RADIUS,
            max: MAX_ERASER_RADIUS,
            step: ERASER_RADIUS_STEP,
        }
    }
}

impl EraserRange {
    /// Create a range, swapping reversed bounds and treating a zero step as 1
    pub fn new(min: u32, max: u32, step: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            step: step.max(1),
        }
    }

    /// Clamp a requested radius into range and snap it to the nearest step
    pub fn normalize(&self, value: i64) -> u32 {
        let (min, max, step) = (self.min as u64, self.max as u64, self.step as u64);
        let clamped = value.clamp(min as i64, max as i64) as u64;
        let steps = (clamped - min + step / 2) / step;
        (min + steps * step).min(max) as u32
    }
}
