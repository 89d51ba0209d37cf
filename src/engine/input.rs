//! Input dispatch for [`SceneEngine`].

use glam::Vec2;

use super::SceneEngine;
use crate::device::DeviceCapabilities;
use crate::input::{InputEvent, MouseButton};

impl SceneEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Resizes are always tracked so the tier is right at mount; everything
    /// else is ignored while unmounted. Returns `true` when the event
    /// changed scene state.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if let InputEvent::Resized {
            width,
            height,
            capabilities,
        } = event
        {
            self.resize(Vec2::new(width, height), capabilities);
            return true;
        }
        if !self.is_mounted() {
            return false;
        }
        match event {
            InputEvent::Resized { .. } => false,
            InputEvent::Scroll { delta_y } => {
                self.state.zoom.adjust_target(delta_y)
            }
            InputEvent::CursorMoved { x, y } => {
                self.dispatch_cursor_moved(Vec2::new(x, y));
                true
            }
            InputEvent::MouseButton { button, pressed } => {
                self.dispatch_mouse_button(button, pressed)
            }
            InputEvent::CursorLeft => self.release_pointer(),
            InputEvent::Orientation(sample) => {
                self.state.record_orientation(sample)
            }
            InputEvent::LoaderHidden => self.hide_loader(),
        }
    }

    fn resize(
        &mut self,
        viewport: Vec2,
        capabilities: DeviceCapabilities,
    ) {
        self.viewport = viewport.max(Vec2::ONE);
        if let Some(camera) = self.camera.as_mut() {
            camera.resize(viewport.x, viewport.y);
        }
        if let Some(profile) = self.classifier.observe(viewport.x, capabilities)
        {
            self.apply_profile(profile);
        }
    }

    /// Cursor moved: continue an orbit drag if one is active.
    fn dispatch_cursor_moved(&mut self, pos: Vec2) {
        self.cursor_pos = pos;
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.pointer_move(pos, self.viewport.y);
        }
    }

    /// Primary button starts and ends drags; other buttons are ignored.
    fn dispatch_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        if !pressed {
            return self.release_pointer();
        }
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.pointer_down(self.cursor_pos);
        }
        self.cursor.set_pressed(true);
        true
    }

    fn release_pointer(&mut self) -> bool {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.pointer_up();
        }
        self.cursor.set_pressed(false);
        true
    }
}
