use crate::device::DeviceCapabilities;
use crate::sensor::OrientationSample;

/// Platform-agnostic input events.
///
/// Hosts translate their native events (winit window events, DOM events)
/// into these and feed them to
/// [`SceneEngine::handle_input`](crate::engine::SceneEngine::handle_input).
///
/// # Example
///
/// ```ignore
/// engine.handle_input(InputEvent::Scroll { delta_y: 120.0 });
/// engine.handle_input(InputEvent::CursorMoved { x: 100.0, y: 200.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The viewport changed size.
    Resized {
        /// Width in CSS pixels.
        width: f32,
        /// Height in CSS pixels.
        height: f32,
        /// Capabilities detected at the time of the resize.
        capabilities: DeviceCapabilities,
    },
    /// Wheel scrolled.
    Scroll {
        /// Vertical delta in CSS pixels; positive scrolls down (zooms out).
        delta_y: f32,
    },
    /// Cursor moved to absolute viewport position.
    CursorMoved {
        /// Horizontal position in CSS pixels.
        x: f32,
        /// Vertical position in CSS pixels.
        y: f32,
    },
    /// Mouse button or primary touch pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// The pointer left the viewport.
    CursorLeft,
    /// A device-orientation reading arrived.
    Orientation(OrientationSample),
    /// The page finished loading; hide the loader now.
    LoaderHidden,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button or touch.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}
