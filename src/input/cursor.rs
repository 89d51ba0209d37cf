//! Grab/grabbing cursor feedback over the canvas.

/// Cursor to show over the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// Platform default; used when feedback is off.
    #[default]
    Default,
    /// Hovering, ready to drag.
    Grab,
    /// Dragging.
    Grabbing,
}

impl CursorStyle {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Tracks whether the primary button is held. Feedback only applies on
/// wide viewports; elsewhere the style stays [`CursorStyle::Default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorState {
    enabled: bool,
    pressed: bool,
}

impl CursorState {
    /// Turn feedback on or off (on tier change).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pressed = false;
        }
    }

    /// Primary button pressed or released.
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = self.enabled && pressed;
    }

    /// Drop all state; used on unmount.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Style for the current state.
    #[must_use]
    pub fn style(&self) -> CursorStyle {
        match (self.enabled, self.pressed) {
            (false, _) => CursorStyle::Default,
            (true, false) => CursorStyle::Grab,
            (true, true) => CursorStyle::Grabbing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grab_then_grabbing_while_pressed() {
        let mut cursor = CursorState::default();
        cursor.set_enabled(true);
        assert_eq!(cursor.style(), CursorStyle::Grab);
        cursor.set_pressed(true);
        assert_eq!(cursor.style().css(), "grabbing");
        cursor.set_pressed(false);
        assert_eq!(cursor.style(), CursorStyle::Grab);
    }

    #[test]
    fn disabled_cursor_ignores_presses() {
        let mut cursor = CursorState::default();
        cursor.set_pressed(true);
        assert_eq!(cursor.style(), CursorStyle::Default);

        cursor.set_enabled(true);
        cursor.set_pressed(true);
        cursor.reset();
        assert_eq!(cursor.style(), CursorStyle::Default);
    }
}
