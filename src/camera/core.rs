use glam::{Mat4, Vec2, Vec3};

/// The camera surface the scene controllers drive.
///
/// Controllers only ever touch these operations, so any renderer's camera
/// can be adapted by implementing the trait.
pub trait HostCamera {
    /// Current zoom scalar (orthographic magnification).
    fn zoom(&self) -> f32;
    /// Overwrite the zoom scalar. Takes effect on the next
    /// [`update_projection_matrix`](Self::update_projection_matrix).
    fn set_zoom(&mut self, zoom: f32);
    /// Eye position in world space.
    fn position(&self) -> Vec3;
    /// Move the eye.
    fn set_position(&mut self, position: Vec3);
    /// Rebuild the projection from the current zoom and viewport.
    fn update_projection_matrix(&mut self);
    /// Orient the camera toward `target`.
    fn look_at(&mut self, target: Vec3);
}

/// Orthographic camera whose frustum is the viewport in CSS pixels divided
/// by `zoom`.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// World units per CSS pixel, inverted.
    pub zoom: f32,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    projection: Mat4,
    projection_updates: u64,
}

impl OrthographicCamera {
    /// Create a camera at `eye` looking at the origin.
    #[must_use]
    pub fn new(eye: Vec3, zoom: f32, viewport: Vec2) -> Self {
        let mut camera = Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            zoom,
            viewport: viewport.max(Vec2::ONE),
            znear: 0.1,
            zfar: 1000.0,
            projection: Mat4::IDENTITY,
            projection_updates: 0,
        };
        camera.update_projection_matrix();
        camera.projection_updates = 0;
        camera
    }

    /// Resize the frustum. Ignores zero-sized dimensions.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.update_projection_matrix();
        }
    }

    /// Projection matrix as of the last refresh.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// View matrix for the current eye and target.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection * self.view()
    }

    /// How many times the projection was rebuilt since construction.
    #[must_use]
    pub fn projection_updates(&self) -> u64 {
        self.projection_updates
    }
}

impl HostCamera for OrthographicCamera {
    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    fn position(&self) -> Vec3 {
        self.eye
    }

    fn set_position(&mut self, position: Vec3) {
        self.eye = position;
    }

    fn update_projection_matrix(&mut self) {
        let half = self.viewport * 0.5 / self.zoom.max(f32::EPSILON);
        // orthographic_rh uses [0,1] depth range (wgpu convention)
        self.projection = Mat4::orthographic_rh(
            -half.x, half.x, -half.y, half.y, self.znear, self.zfar,
        );
        self.projection_updates += 1;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Orthographic zoom.
    pub zoom: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            zoom: 1.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &OrthographicCamera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.zoom = camera.zoom;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    fn camera() -> OrthographicCamera {
        OrthographicCamera::new(
            Vec3::new(1.0, 20.0, 50.0),
            40.0,
            Vec2::new(1280.0, 720.0),
        )
    }

    #[test]
    fn zoom_only_applies_after_projection_refresh() {
        let mut cam = camera();
        let before = cam.projection();
        cam.set_zoom(80.0);
        assert_eq!(cam.projection(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection(), before);
        assert_eq!(cam.projection_updates(), 1);
    }

    #[test]
    fn frustum_edge_is_half_viewport_over_zoom() {
        let cam = camera();
        // A point at x = 640/40 = 16 on the view plane lands on the right
        // edge of clip space.
        let clip = cam.projection() * Vec4::new(16.0, 0.0, -1.0, 1.0);
        assert!((clip.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let mut cam = camera();
        cam.look_at(Vec3::ZERO);
        let clip = cam.build_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4);
    }

    #[test]
    fn uniform_mirrors_camera() {
        let cam = camera();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&cam);
        assert_eq!(uniform.position, [1.0, 20.0, 50.0]);
        assert_eq!(uniform.zoom, 40.0);
        assert_eq!(size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut cam = camera();
        cam.resize(0.0, 300.0);
        assert_eq!(cam.viewport, Vec2::new(1280.0, 720.0));
    }
}
