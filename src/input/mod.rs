//! Input handling: platform-agnostic event types and cursor feedback.

/// Grab/grabbing cursor state.
pub mod cursor;
/// Platform-agnostic input events.
pub mod event;

pub use cursor::{CursorState, CursorStyle};
pub use event::{InputEvent, MouseButton};
