//! Device-orientation input: samples, the per-mount baseline and the
//! consent gate that decides whether samples are used at all.

mod orientation;
mod permission;

pub use orientation::{OrientationSample, OrientationTracker};
pub use permission::{
    OrientationPermission, PermissionGate, PermissionResponse,
    PermissionState, RequestStart, SensorCapability,
};
