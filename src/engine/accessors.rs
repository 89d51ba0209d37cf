//! Read-only query methods for [`SceneEngine`].

use glam::{Vec2, Vec3};

use super::SceneEngine;
use crate::animation::{AnimationDriver, LoaderFrame, LoaderPhase};
use crate::camera::core::{CameraUniform, OrthographicCamera};
use crate::camera::pose::CameraPose;
use crate::camera::zoom::ZoomState;
use crate::device::{DeviceProfile, RenderQuality};
use crate::input::CursorStyle;
use crate::options::Options;
use crate::sensor::OrientationSample;

// ── Camera ──

impl SceneEngine {
    /// The live camera, if mounted.
    #[must_use]
    pub fn camera(&self) -> Option<&OrthographicCamera> {
        self.camera.as_ref()
    }

    /// Camera placement with derived orbit angles, if mounted.
    #[must_use]
    pub fn pose(&self) -> Option<CameraPose> {
        self.camera
            .as_ref()
            .map(|camera| CameraPose::from_position(camera.eye))
    }

    /// GPU uniform for the current camera; identity while unmounted.
    #[must_use]
    pub fn camera_uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        if let Some(camera) = self.camera.as_ref() {
            uniform.update_view_proj(camera);
        }
        uniform
    }

    /// Zoom target and displayed value.
    #[must_use]
    pub fn zoom_state(&self) -> ZoomState {
        self.state.zoom.state()
    }

    /// Value of the intro tween's position record.
    #[must_use]
    pub fn scripted_position(&self) -> Vec3 {
        self.state.intro_record
    }

    /// Whether the intro tween is still pending or running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state
            .animation
            .as_ref()
            .is_some_and(AnimationDriver::is_active)
    }
}

// ── Device ──

impl SceneEngine {
    /// Current device profile.
    #[must_use]
    pub fn profile(&self) -> DeviceProfile {
        self.classifier.profile()
    }

    /// Texture budgets for the current tier.
    #[must_use]
    pub fn quality(&self) -> RenderQuality {
        self.classifier.tier().quality()
    }

    /// Viewport in CSS pixels.
    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Whether orientation samples are recorded and blended.
    #[must_use]
    pub fn sensor_active(&self) -> bool {
        self.state.sensor_active
    }

    /// First orientation reading of this mount.
    #[must_use]
    pub fn orientation_baseline(&self) -> Option<OrientationSample> {
        self.state.orientation.baseline()
    }

    /// Cursor to show over the canvas.
    #[must_use]
    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor.style()
    }
}

// ── Loader ──

impl SceneEngine {
    /// Loader phase.
    #[must_use]
    pub fn loader_phase(&self) -> LoaderPhase {
        self.loader.phase()
    }

    /// Animated loader values for this frame.
    #[must_use]
    pub fn loader_frame(&self) -> LoaderFrame {
        self.loader.frame()
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}
