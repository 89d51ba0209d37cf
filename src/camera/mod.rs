//! Camera system for the scene.
//!
//! Provides an orthographic host camera, a drag-orbit rig pinned to a single
//! polar band, inertial zoom, and the per-frame pose blender that merges
//! scripted motion, device tilt and manual drag.

/// Core camera trait, orthographic camera and GPU uniform types.
pub mod core;
/// Drag-to-orbit rig with damping.
pub mod orbit;
/// Scripted, gyroscope and orbit pose blending.
pub mod pose;
/// Spherical/cartesian conversion.
pub mod spherical;
/// Tier-driven, wheel-adjusted smooth zoom.
pub mod zoom;
