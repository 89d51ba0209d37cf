//! Mutable state owned by one scene instance.

use glam::Vec3;

use crate::animation::{AnimationDriver, PositionTween, TweenStatus};
use crate::camera::pose::CameraPoseBlender;
use crate::camera::zoom::ZoomController;
use crate::options::Options;
use crate::sensor::{OrientationSample, OrientationTracker};

/// Everything the input handlers and the frame callback share.
///
/// Rebuilt on every mount, so the tween, the zoom and the orientation
/// baseline never outlive the mount that created them.
#[derive(Debug)]
pub struct SceneState {
    /// Inertial zoom.
    pub zoom: ZoomController,
    /// Pose merge.
    pub blender: CameraPoseBlender,
    /// Position written by the intro tween, read by the blender.
    pub intro_record: Vec3,
    /// Created on first use.
    pub animation: Option<AnimationDriver>,
    /// Latest reading and baseline.
    pub orientation: OrientationTracker,
    /// Orientation samples are recorded and blended.
    pub sensor_active: bool,
}

impl SceneState {
    /// Fresh state with the camera record at the intro start position.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let start = Vec3::from_array(options.intro.start);
        Self {
            zoom: ZoomController::new(options.zoom.clone()),
            blender: CameraPoseBlender::new(start, options.gyro.clone()),
            intro_record: start,
            animation: None,
            orientation: OrientationTracker::new(),
            sensor_active: false,
        }
    }

    /// Play a tween on the driver, creating the driver if needed.
    pub fn play(&mut self, tween: PositionTween) {
        self.animation
            .get_or_insert_with(|| {
                log::debug!("animation driver initialized");
                AnimationDriver::new()
            })
            .play(tween);
    }

    /// Advance the running tween against the intro record.
    pub fn advance_animation(&mut self, dt: f32) -> Option<TweenStatus> {
        self.animation
            .as_mut()?
            .advance(dt, &mut self.intro_record)
    }

    /// Record a reading if the sensor is active. Returns whether it was
    /// kept.
    pub fn record_orientation(&mut self, sample: OrientationSample) -> bool {
        if !self.sensor_active {
            return false;
        }
        self.orientation.record(sample);
        true
    }

    /// Kill anything still running.
    pub fn teardown(&mut self) {
        if let Some(driver) = self.animation.as_mut() {
            driver.kill_all();
        }
        self.sensor_active = false;
    }
}
