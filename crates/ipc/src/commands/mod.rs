//! Command types for IPC messages.

mod announcement;
mod draw;

pub use announcement::*;
pub use draw::*;
