//! Per-frame merge of scripted motion, device tilt and manual orbit.
//!
//! Three influences share one camera: the orbit rig (drag), the intro tween
//! (a position record written by the animation driver) and the gyroscope.
//! The blender applies them in a fixed order each frame so none of them
//! overwrites the others outright:
//!
//! 1. copy the tween record into the camera, only when it changed;
//! 2. nudge the azimuth toward the tilted pose by a small lerp;
//! 3. look at the origin and let the orbit rig reconcile.

use glam::Vec3;

use super::core::HostCamera;
use super::orbit::OrbitControls;
use super::spherical::Spherical;
use crate::options::GyroOptions;
use crate::sensor::OrientationTracker;

/// Camera placement with angles derived from the position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Authoritative eye position.
    pub position: Vec3,
    /// Orbit azimuth around +Y, radians.
    pub azimuth: f32,
    /// Orbit polar angle from +Y, radians.
    pub polar: f32,
    /// Look-at point. Always the world origin.
    pub target: Vec3,
}

impl CameraPose {
    /// Derive the pose of a camera at `position` looking at the origin.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        let spherical = Spherical::from_cartesian(position);
        Self {
            position,
            azimuth: spherical.azimuth,
            polar: spherical.polar,
            target: Vec3::ZERO,
        }
    }
}

/// Which steps of a [`CameraPoseBlender::update`] wrote the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlendOutcome {
    /// The tween record was copied in.
    pub scripted: bool,
    /// The gyroscope moved the camera.
    pub gyro: bool,
    /// The orbit rig moved the camera.
    pub orbit: bool,
}

impl BlendOutcome {
    /// Whether anything moved the camera this frame.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.scripted || self.gyro || self.orbit
    }
}

/// Merges the three camera influences; see the module docs for the order.
#[derive(Debug, Clone)]
pub struct CameraPoseBlender {
    cached_record: Vec3,
    gyro: GyroOptions,
}

impl CameraPoseBlender {
    /// `initial_record` is the tween record's value at mount, so an idle
    /// tween never writes.
    #[must_use]
    pub fn new(initial_record: Vec3, gyro: GyroOptions) -> Self {
        Self {
            cached_record: initial_record,
            gyro,
        }
    }

    /// Copy the scripted position into the camera if it changed since the
    /// last frame.
    pub fn sync_scripted(
        &mut self,
        record: Vec3,
        camera: &mut dyn HostCamera,
    ) -> bool {
        if record == self.cached_record {
            return false;
        }
        self.cached_record = record;
        camera.set_position(record);
        true
    }

    /// Step the camera a fixed fraction toward the azimuth implied by the
    /// current device roll. No-op until the tracker has a baseline.
    pub fn blend_gyro(
        &self,
        tracker: &OrientationTracker,
        camera: &mut dyn HostCamera,
    ) -> bool {
        let Some(delta_gamma) = tracker.gamma_delta() else {
            return false;
        };
        let position = camera.position();
        let mut spherical = Spherical::from_cartesian(position);
        if spherical.radius <= 0.0 {
            return false;
        }
        spherical.azimuth -= delta_gamma * self.gyro.sensitivity;
        let candidate = spherical.to_cartesian();

        let next = position.lerp(candidate, self.gyro.blend.clamp(0.0, 1.0));
        if next == position {
            return false;
        }
        camera.set_position(next);
        true
    }

    /// Face the origin and hand the camera back to the orbit rig.
    pub fn finish(
        &self,
        camera: &mut dyn HostCamera,
        controls: &mut dyn OrbitControls,
    ) -> bool {
        camera.look_at(Vec3::ZERO);
        controls.set_target(Vec3::ZERO);
        controls.update(camera)
    }

    /// Run all three steps. `tracker` is `None` while the sensor is
    /// inactive.
    pub fn update(
        &mut self,
        record: Vec3,
        tracker: Option<&OrientationTracker>,
        camera: &mut dyn HostCamera,
        controls: &mut dyn OrbitControls,
    ) -> BlendOutcome {
        let scripted = self.sync_scripted(record, camera);
        let gyro = tracker.is_some_and(|t| self.blend_gyro(t, camera));
        let orbit = self.finish(camera, controls);
        BlendOutcome {
            scripted,
            gyro,
            orbit,
        }
    }

    /// Record value seen last frame.
    #[must_use]
    pub fn cached_record(&self) -> Vec3 {
        self.cached_record
    }
}
