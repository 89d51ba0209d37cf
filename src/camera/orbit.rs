//! Drag-to-orbit rig with inertial damping.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::core::HostCamera;
use super::spherical::Spherical;
use crate::options::OrbitOptions;

/// The orbit-control surface the scene controllers drive.
pub trait OrbitControls {
    /// Point the rig orbits around.
    fn target(&self) -> Vec3;
    /// Move the orbit pivot.
    fn set_target(&mut self, target: Vec3);
    /// Reconcile pending rotation and limits with the camera. Returns
    /// `true` when the camera moved.
    fn update(&mut self, camera: &mut dyn HostCamera) -> bool;
}

/// Pointer-driven orbit around a fixed pivot.
///
/// Drags accumulate a pending rotation; each [`update`](OrbitControls::update)
/// applies a `damping` fraction of it and keeps the rest, which gives the
/// rig its glide after the pointer lets go. Zoom and pan are not handled
/// here: zoom belongs to the zoom controller and the pivot never moves.
#[derive(Debug, Clone)]
pub struct OrbitRig {
    target: Vec3,
    /// Pending (azimuth, polar) rotation in radians.
    pending: Vec2,
    options: OrbitOptions,
    last_pointer: Option<Vec2>,
    enabled: bool,
}

/// Below this the camera counts as not having moved.
const MOVE_EPSILON: f32 = 1e-6;

impl OrbitRig {
    /// Create a rig orbiting the origin.
    #[must_use]
    pub fn new(options: OrbitOptions) -> Self {
        Self {
            target: Vec3::ZERO,
            pending: Vec2::ZERO,
            options,
            last_pointer: None,
            enabled: true,
        }
    }

    /// Enable or disable pointer input. Pending rotation still drains.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.last_pointer = None;
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Rotation still waiting to be applied, (azimuth, polar).
    #[must_use]
    pub fn pending(&self) -> Vec2 {
        self.pending
    }

    /// Start a drag at `pos` (CSS pixels).
    pub fn pointer_down(&mut self, pos: Vec2) {
        if self.enabled {
            self.last_pointer = Some(pos);
        }
    }

    /// Continue a drag. `viewport_height` scales pixels to angle so a drag
    /// across the full height turns one revolution.
    pub fn pointer_move(&mut self, pos: Vec2, viewport_height: f32) {
        let Some(last) = self.last_pointer else {
            return;
        };
        self.rotate(pos - last, viewport_height);
        self.last_pointer = Some(pos);
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.last_pointer = None;
    }

    /// Queue a rotation for a pointer displacement of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let scale = TAU / height * self.options.rotate_speed;
        self.pending -= delta * scale;
    }

    fn damping(&self) -> f32 {
        self.options.damping.clamp(f32::EPSILON, 1.0)
    }
}

impl OrbitControls for OrbitRig {
    fn target(&self) -> Vec3 {
        self.target
    }

    fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn update(&mut self, camera: &mut dyn HostCamera) -> bool {
        let before = camera.position();
        let mut spherical = Spherical::from_cartesian(before - self.target);

        let damping = self.damping();
        spherical.azimuth += self.pending.x * damping;
        spherical.polar += self.pending.y * damping;
        spherical.polar = spherical
            .polar
            .clamp(self.options.min_polar, self.options.max_polar);
        let spherical = spherical.make_safe();

        let after = self.target + spherical.to_cartesian();
        camera.set_position(after);
        camera.look_at(self.target);

        self.pending *= 1.0 - damping;
        if self.pending.length_squared() < MOVE_EPSILON * MOVE_EPSILON {
            self.pending = Vec2::ZERO;
        }

        before.distance_squared(after) > MOVE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_3;

    use super::*;
    use crate::camera::core::OrthographicCamera;

    /// Radius 30 at the pinned polar angle.
    fn pinned_camera() -> OrthographicCamera {
        let eye = Spherical::new(30.0, FRAC_PI_3, 0.4).to_cartesian();
        OrthographicCamera::new(eye, 40.0, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn vertical_drag_has_no_effect() {
        let mut rig = OrbitRig::new(OrbitOptions::default());
        let mut cam = pinned_camera();
        let start = cam.position();

        rig.pointer_down(Vec2::new(400.0, 300.0));
        rig.pointer_move(Vec2::new(400.0, 100.0), 600.0);
        rig.pointer_up();
        for _ in 0..200 {
            let _ = rig.update(&mut cam);
        }
        assert!((cam.position() - start).length() < 1e-3);
    }

    #[test]
    fn horizontal_drag_glides_to_the_full_angle() {
        let mut rig = OrbitRig::new(OrbitOptions::default());
        let mut cam = pinned_camera();
        let start = Spherical::from_cartesian(cam.position());

        // A sixth of the viewport height is a sixth of a turn
        rig.rotate(Vec2::new(-100.0, 0.0), 600.0);
        assert!(rig.update(&mut cam));
        let first = Spherical::from_cartesian(cam.position());
        let step = first.azimuth - start.azimuth;
        assert!((step - TAU / 6.0 * 0.02).abs() < 1e-4);

        for _ in 0..2000 {
            let _ = rig.update(&mut cam);
        }
        let end = Spherical::from_cartesian(cam.position());
        assert!((end.azimuth - start.azimuth - TAU / 6.0).abs() < 1e-3);
        assert!((end.radius - 30.0).abs() < 1e-3);
        assert_eq!(rig.pending(), Vec2::ZERO);
    }

    #[test]
    fn off_band_camera_is_pulled_onto_the_pinned_polar_angle() {
        let mut rig = OrbitRig::new(OrbitOptions::default());
        let mut cam = OrthographicCamera::new(
            Vec3::new(1.0, 20.0, 50.0),
            40.0,
            Vec2::new(800.0, 600.0),
        );
        let _ = rig.update(&mut cam);
        let s = Spherical::from_cartesian(cam.position());
        assert!((s.polar - FRAC_PI_3).abs() < 1e-5);
        assert!((s.radius - Vec3::new(1.0, 20.0, 50.0).length()).abs() < 1e-3);
    }

    #[test]
    fn moves_without_drag_are_ignored_and_disabled_rig_ignores_drags() {
        let mut rig = OrbitRig::new(OrbitOptions::default());
        rig.pointer_move(Vec2::new(50.0, 0.0), 600.0);
        assert_eq!(rig.pending(), Vec2::ZERO);

        rig.set_enabled(false);
        rig.pointer_down(Vec2::ZERO);
        assert!(!rig.is_dragging());
    }

    #[test]
    fn update_points_camera_at_the_pivot() {
        let mut rig = OrbitRig::new(OrbitOptions::default());
        let mut cam = pinned_camera();
        cam.look_at(Vec3::ONE);
        let _ = rig.update(&mut cam);
        assert_eq!(cam.target, Vec3::ZERO);
    }
}
