//! GPU resources: device and surface setup, the camera uniform binding and
//! the background clear color.

/// Scene and loader clear colors.
pub mod background;
/// Camera uniform buffer and bind group.
pub mod camera_binding;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
