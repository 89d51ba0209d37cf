//! The per-frame entry point.

use super::state::SceneState;
use crate::camera::core::HostCamera;
use crate::camera::orbit::OrbitControls;
use crate::camera::pose::BlendOutcome;

/// What one scheduled frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Zoom shown this frame.
    pub zoom: f32,
    /// The camera's zoom scalar was written.
    pub zoom_changed: bool,
    /// Which pose influences moved the camera.
    pub blend: BlendOutcome,
    /// The projection matrix was rebuilt.
    pub projection_refreshed: bool,
}

/// Runs zoom smoothing and pose blending once per rendered frame.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    reference_fps: Option<f32>,
    frames: u64,
}

impl FrameScheduler {
    /// With `reference_fps` set, zoom smoothing is scaled by elapsed time;
    /// without it every frame closes the same fraction of the gap.
    #[must_use]
    pub fn new(reference_fps: Option<f32>) -> Self {
        Self {
            reference_fps: reference_fps.filter(|fps| *fps > 0.0),
            frames: 0,
        }
    }

    /// Frames that reached the camera.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Returns `None` without touching any state when the
    /// camera or the orbit rig is not mounted.
    pub fn frame(
        &mut self,
        state: &mut SceneState,
        camera: Option<&mut dyn HostCamera>,
        controls: Option<&mut dyn OrbitControls>,
        dt: f32,
    ) -> Option<FrameReport> {
        let (Some(camera), Some(controls)) = (camera, controls) else {
            return None;
        };
        self.frames += 1;

        let zoom = match self.reference_fps {
            Some(fps) => state.zoom.tick_for(dt, fps),
            None => state.zoom.tick(),
        };
        let zoom_changed = camera.zoom() != zoom;
        if zoom_changed {
            camera.set_zoom(zoom);
        }

        let tracker = state.sensor_active.then_some(&state.orientation);
        let blend =
            state
                .blender
                .update(state.intro_record, tracker, camera, controls);

        let projection_refreshed = zoom_changed || blend.moved();
        if projection_refreshed {
            camera.update_projection_matrix();
        }

        Some(FrameReport {
            zoom,
            zoom_changed,
            blend,
            projection_refreshed,
        })
    }
}
