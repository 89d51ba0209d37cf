//! The scene controller.
//!
//! [`SceneEngine`] owns every piece of per-scene state: device profile,
//! zoom, pose blending, the intro tween, the loader timeline, the sensor
//! permission gate and the cursor. Hosts feed it [`InputEvent`]s, call
//! [`SceneEngine::update`] once per rendered frame and read the camera back
//! for drawing.

mod accessors;
mod input;
mod permission;
mod scheduler;
mod state;

use glam::{Vec2, Vec3};

pub use self::scheduler::{FrameReport, FrameScheduler};
pub use self::state::SceneState;
use crate::animation::{LoaderEvent, LoaderTimeline, PositionTween};
use crate::camera::core::{HostCamera, OrthographicCamera};
use crate::camera::orbit::OrbitRig;
use crate::device::{DeviceCapabilities, DeviceClassifier, DeviceProfile};
use crate::input::{CursorState, InputEvent};
use crate::options::Options;
use crate::sensor::{PermissionGate, PermissionState, SensorCapability};

/// Per-scene controller driven by a host render loop.
///
/// # Example
///
/// ```ignore
/// let mut engine = SceneEngine::new(options, viewport, caps, sensor);
/// engine.mount();
/// // every frame:
/// let _ = engine.update(dt);
/// // on teardown:
/// engine.unmount();
/// ```
#[derive(Debug)]
pub struct SceneEngine {
    options: Options,
    classifier: DeviceClassifier,
    state: SceneState,
    scheduler: FrameScheduler,
    loader: LoaderTimeline,
    permission: PermissionGate,
    cursor: CursorState,
    camera: Option<OrthographicCamera>,
    orbit: Option<OrbitRig>,
    viewport: Vec2,
    cursor_pos: Vec2,
}

impl SceneEngine {
    /// Classify the device and prepare state. Nothing moves until
    /// [`mount`](Self::mount).
    #[must_use]
    pub fn new(
        options: Options,
        viewport: Vec2,
        capabilities: DeviceCapabilities,
        sensor: SensorCapability,
    ) -> Self {
        let classifier =
            DeviceClassifier::new(options.device.clone(), viewport.x, capabilities);
        let mut engine = Self {
            state: SceneState::new(&options),
            scheduler: FrameScheduler::new(options.zoom.reference_fps),
            loader: LoaderTimeline::new(&options.intro),
            permission: PermissionGate::new(sensor),
            cursor: CursorState::default(),
            camera: None,
            orbit: None,
            viewport,
            cursor_pos: Vec2::ZERO,
            classifier,
            options,
        };
        engine.apply_profile(engine.classifier.profile());
        engine
    }

    /// Start a mount: fresh zoom, pose, tween, baseline, loader and
    /// permission gate, then the camera and orbit rig. Calling it while
    /// mounted is a no-op.
    pub fn mount(&mut self) {
        if self.camera.is_some() {
            return;
        }
        self.state = SceneState::new(&self.options);
        self.loader = LoaderTimeline::new(&self.options.intro);
        self.permission = PermissionGate::new(self.permission.capability());
        self.cursor.reset();
        let profile = self.classifier.profile();
        self.apply_profile(profile);

        let start = Vec3::from_array(self.options.intro.start);
        let mut camera = OrthographicCamera::new(
            start,
            self.state.zoom.state().current,
            self.viewport,
        );
        camera.look_at(Vec3::ZERO);
        self.camera = Some(camera);
        self.orbit = Some(OrbitRig::new(self.options.orbit.clone()));
        self.refresh_sensor();

        log::info!(
            "scene mounted: {:?} tier, zoom {:.1}, sensor {:?}",
            profile.tier,
            self.state.zoom.state().current,
            self.permission.capability()
        );
    }

    /// Release the camera, kill running tweens and clear the cursor. Frames
    /// and input after this are no-ops.
    pub fn unmount(&mut self) {
        self.state.teardown();
        self.camera = None;
        self.orbit = None;
        self.cursor.reset();
        log::info!("scene unmounted");
    }

    /// Whether the camera is live.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.camera.is_some()
    }

    /// Advance the loader and the intro tween by `dt` seconds and run one
    /// scheduled frame. Returns `None` while unmounted.
    pub fn update(&mut self, dt: f32) -> Option<FrameReport> {
        for event in self.loader.tick(dt) {
            self.on_loader_event(event);
        }
        if self.is_mounted() {
            let _ = self.state.advance_animation(dt);
        }

        match (self.camera.as_mut(), self.orbit.as_mut()) {
            (Some(camera), Some(orbit)) => self.scheduler.frame(
                &mut self.state,
                Some(camera),
                Some(orbit),
                dt,
            ),
            _ => self.scheduler.frame(&mut self.state, None, None, dt),
        }
    }

    /// Start the loader outro if its minimum display time has passed.
    /// Returns `false` if it is too early or the outro already started.
    pub fn hide_loader(&mut self) -> bool {
        match self.loader.hide() {
            Some(event) => {
                self.on_loader_event(event);
                true
            }
            None => false,
        }
    }

    fn on_loader_event(&mut self, event: LoaderEvent) {
        match event {
            LoaderEvent::Hidden => {
                if !self.is_mounted() {
                    log::debug!("loader hidden before mount; reveal skipped");
                    return;
                }
                log::info!("loader hidden; starting camera reveal");
                self.state.play(PositionTween::reveal(&self.options.intro));
            }
            LoaderEvent::Finished => log::debug!("loader removed"),
        }
    }

    /// Push a new device profile into the controllers.
    fn apply_profile(&mut self, profile: DeviceProfile) {
        self.state.zoom.set_target_for_tier(profile.tier);
        self.state.zoom.set_wheel_enabled(profile.wheel_zoom_enabled());
        self.cursor.set_enabled(profile.cursor_feedback());
        self.refresh_sensor();
    }

    /// Sensor samples count while mounted, on a tier that uses tilt, once
    /// the platform allows it.
    fn refresh_sensor(&mut self) {
        let allowed = match self.permission.capability() {
            SensorCapability::NoPermissionNeeded => true,
            SensorCapability::PermissionRequired => {
                self.permission.state() == PermissionState::Granted
            }
            SensorCapability::Unsupported => false,
        };
        let active = self.is_mounted()
            && allowed
            && self.classifier.profile().gyro_enabled(&self.options.gyro);
        if active != self.state.sensor_active {
            log::debug!("orientation sensor active: {active}");
        }
        self.state.sensor_active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::LoaderPhase;
    use crate::device::DeviceTier;
    use crate::input::{CursorStyle, MouseButton};
    use crate::sensor::OrientationSample;

    const FRAME: f32 = 1.0 / 60.0;

    fn desktop() -> DeviceCapabilities {
        DeviceCapabilities {
            has_orientation_sensor: false,
            touch_primary: false,
        }
    }

    fn phone() -> DeviceCapabilities {
        DeviceCapabilities {
            has_orientation_sensor: true,
            touch_primary: true,
        }
    }

    fn mounted(
        width: f32,
        caps: DeviceCapabilities,
        sensor: SensorCapability,
    ) -> SceneEngine {
        let mut engine = SceneEngine::new(
            Options::default(),
            Vec2::new(width, 800.0),
            caps,
            sensor,
        );
        engine.mount();
        engine
    }

    /// Mounted desktop scene whose loader may hide right away.
    fn quick_loader() -> SceneEngine {
        let mut options = Options::default();
        options.intro.min_display_secs = 0.0;
        let mut engine = SceneEngine::new(
            options,
            Vec2::new(1280.0, 800.0),
            desktop(),
            SensorCapability::Unsupported,
        );
        engine.mount();
        engine
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn run_for(engine: &mut SceneEngine, secs: f32) {
        let frames = (secs / FRAME).round() as u32;
        for _ in 0..frames {
            let _ = engine.update(FRAME);
        }
    }

    #[test]
    fn reveal_tween_follows_loader_hide() {
        let mut engine = quick_loader();
        let start = Vec3::new(1.0, 20.0, 50.0);
        let rest = Vec3::new(10.0, 20.0, 20.0);
        assert!(engine.handle_input(InputEvent::LoaderHidden));

        run_for(&mut engine, 0.4);
        assert!((engine.scripted_position() - start).length() < 1e-4);

        run_for(&mut engine, 1.55);
        assert!((engine.scripted_position() - rest).length() < 1e-4);
        assert!(!engine.is_animating());
    }

    #[test]
    fn loader_hides_itself_after_min_display() {
        let mut engine = mounted(1280.0, desktop(), SensorCapability::Unsupported);
        run_for(&mut engine, 1.0);
        assert_eq!(engine.loader_phase(), LoaderPhase::Showing);
        assert!(!engine.is_animating());

        run_for(&mut engine, 0.7);
        assert_eq!(engine.loader_phase(), LoaderPhase::Leaving);
        assert!(engine.is_animating());
        assert!(!engine.hide_loader());

        run_for(&mut engine, 3.0);
        assert_eq!(engine.loader_phase(), LoaderPhase::Finished);
    }

    #[test]
    fn tier_change_retargets_zoom_without_a_frame() {
        let mut engine = mounted(1200.0, desktop(), SensorCapability::Unsupported);
        assert_eq!(engine.zoom_state().target, 40.0);
        let _ = engine.handle_input(InputEvent::Resized {
            width: 600.0,
            height: 800.0,
            capabilities: desktop(),
        });
        assert_eq!(engine.profile().tier, DeviceTier::Narrow);
        assert_eq!(engine.zoom_state().target, 25.0);
        assert_eq!(engine.zoom_state().current, 40.0);
    }

    #[test]
    fn wheel_zoom_is_ignored_on_touch_devices() {
        let mut engine = mounted(600.0, phone(), SensorCapability::NoPermissionNeeded);
        assert!(!engine.handle_input(InputEvent::Scroll { delta_y: -500.0 }));
        assert_eq!(engine.zoom_state().target, 25.0);

        let mut engine = mounted(1280.0, desktop(), SensorCapability::Unsupported);
        assert!(engine.handle_input(InputEvent::Scroll { delta_y: -500.0 }));
        assert!((engine.zoom_state().target - 42.5).abs() < 1e-5);
    }

    #[test]
    fn orientation_waits_for_permission() {
        let mut engine = mounted(600.0, phone(), SensorCapability::PermissionRequired);
        let sample = OrientationSample {
            alpha: 0.0,
            beta: 45.0,
            gamma: 10.0,
        };
        assert!(!engine.handle_input(InputEvent::Orientation(sample)));
        assert!(!engine.sensor_active());

        let _ = engine.begin_permission();
        let _ = engine.resolve_permission(Ok(crate::sensor::PermissionResponse::Granted));
        assert!(engine.sensor_active());
        assert!(engine.handle_input(InputEvent::Orientation(sample)));
    }

    #[test]
    fn sensor_without_permission_api_is_live_on_mount() {
        let engine = mounted(600.0, phone(), SensorCapability::NoPermissionNeeded);
        assert!(engine.sensor_active());

        let engine = mounted(1280.0, phone(), SensorCapability::NoPermissionNeeded);
        assert!(!engine.sensor_active());
    }

    #[test]
    fn drag_shows_grabbing_cursor_on_desktop() {
        let mut engine = mounted(1280.0, desktop(), SensorCapability::Unsupported);
        assert_eq!(engine.cursor_style(), CursorStyle::Grab);
        let _ = engine.handle_input(InputEvent::CursorMoved { x: 10.0, y: 10.0 });
        let _ = engine.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(engine.cursor_style(), CursorStyle::Grabbing);
        let _ = engine.handle_input(InputEvent::CursorLeft);
        assert_eq!(engine.cursor_style(), CursorStyle::Grab);

        let engine = mounted(600.0, phone(), SensorCapability::Unsupported);
        assert_eq!(engine.cursor_style(), CursorStyle::Default);
    }

    #[test]
    fn unmount_stops_everything() {
        let mut engine = quick_loader();
        assert!(engine.hide_loader());
        run_for(&mut engine, 1.0);
        let mid = engine.scripted_position();

        engine.unmount();
        assert!(!engine.is_animating());
        assert_eq!(engine.update(FRAME), None);
        assert!(!engine.handle_input(InputEvent::Scroll { delta_y: 100.0 }));
        assert_eq!(engine.scripted_position(), mid);
        assert_eq!(engine.cursor_style(), CursorStyle::Default);
    }

    #[test]
    fn early_page_load_keeps_the_loader_up() {
        let mut engine = mounted(1280.0, desktop(), SensorCapability::Unsupported);
        run_for(&mut engine, 0.2);
        assert!(!engine.handle_input(InputEvent::LoaderHidden));
        assert_eq!(engine.loader_phase(), LoaderPhase::Showing);
        assert!(!engine.is_animating());

        run_for(&mut engine, 1.3);
        assert_eq!(engine.loader_phase(), LoaderPhase::Showing);
        run_for(&mut engine, 0.2);
        assert_eq!(engine.loader_phase(), LoaderPhase::Leaving);
        assert!(engine.is_animating());
    }

    #[test]
    fn remount_starts_a_fresh_lifecycle() {
        let start = Vec3::new(1.0, 20.0, 50.0);
        let rest = Vec3::new(10.0, 20.0, 20.0);
        let tilt = |gamma: f32| OrientationSample {
            alpha: 0.0,
            beta: 45.0,
            gamma,
        };

        let mut engine = mounted(600.0, phone(), SensorCapability::NoPermissionNeeded);
        assert!(engine.handle_input(InputEvent::Orientation(tilt(10.0))));
        run_for(&mut engine, 5.0);
        assert_eq!(engine.loader_phase(), LoaderPhase::Finished);
        assert!((engine.scripted_position() - rest).length() < 1e-4);

        engine.unmount();
        engine.mount();
        assert!(engine.sensor_active());
        assert_eq!(engine.loader_phase(), LoaderPhase::Showing);
        assert_eq!(engine.scripted_position(), start);
        assert_eq!(engine.camera().map(|c| c.eye), Some(start));
        assert_eq!(engine.orientation_baseline(), None);

        assert!(engine.handle_input(InputEvent::Orientation(tilt(50.0))));
        assert_eq!(engine.orientation_baseline().map(|s| s.gamma), Some(50.0));

        // The reveal plays again
        run_for(&mut engine, 5.0);
        assert_eq!(engine.loader_phase(), LoaderPhase::Finished);
        assert!((engine.scripted_position() - rest).length() < 1e-4);
    }

    #[test]
    fn remount_resets_zoom_to_the_tier_base() {
        let mut engine = mounted(1280.0, desktop(), SensorCapability::Unsupported);
        assert!(engine.handle_input(InputEvent::Scroll { delta_y: -2000.0 }));
        run_for(&mut engine, 1.0);
        assert!(engine.zoom_state().current > 40.0);

        engine.unmount();
        engine.mount();
        assert_eq!(engine.zoom_state().target, 40.0);
        assert_eq!(engine.zoom_state().current, 40.0);
        assert_eq!(engine.camera().map(|c| c.zoom), Some(40.0));
    }

    #[test]
    fn remount_gives_a_new_permission_gate() {
        let mut engine = mounted(600.0, phone(), SensorCapability::PermissionRequired);
        assert!(engine.dismiss_permission());
        assert!(!engine.permission_prompt_visible());

        engine.unmount();
        engine.mount();
        assert_eq!(engine.permission_state(), PermissionState::Idle);
        assert!(engine.permission_prompt_visible());
    }

    #[test]
    fn frames_are_noops_before_mount() {
        let mut engine = SceneEngine::new(
            Options::default(),
            Vec2::new(1280.0, 800.0),
            desktop(),
            SensorCapability::Unsupported,
        );
        assert_eq!(engine.update(FRAME), None);
        assert!(engine.camera().is_none());
    }
}
