use std::f32::consts::FRAC_PI_3;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit", inline)]
#[serde(default)]
/// Drag-orbit rig parameters.
pub struct OrbitOptions {
    /// Lowest polar angle (radians from +Y) the rig allows.
    #[schemars(skip)]
    pub min_polar: f32,
    /// Highest polar angle (radians from +Y) the rig allows. Equal to
    /// `min_polar` pins the vertical angle so only azimuth is free.
    #[schemars(skip)]
    pub max_polar: f32,
    /// Inertia: fraction of the pending rotation applied per update.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Drag sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Dolly/zoom through the rig. The scene zooms through its own
    /// controller, so only `false` is accepted.
    #[schemars(skip)]
    pub enable_zoom: bool,
    /// Target panning. The rig always orbits the origin, so only `false`
    /// is accepted.
    #[schemars(skip)]
    pub enable_pan: bool,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            min_polar: FRAC_PI_3,
            max_polar: FRAC_PI_3,
            damping: 0.02,
            rotate_speed: 1.0,
            enable_zoom: false,
            enable_pan: false,
        }
    }
}
