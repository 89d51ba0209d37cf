use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gyroscope", inline)]
#[serde(default)]
/// Device-tilt orbit blending parameters.
pub struct GyroOptions {
    /// Radians of azimuth per radian of device roll. Kept low so tilt
    /// never overpowers manual drag.
    #[schemars(title = "Sensitivity", range(min = 0.0, max = 0.2), extend("step" = 0.005))]
    pub sensitivity: f32,
    /// Fraction of the way the camera moves toward the tilted pose per
    /// frame.
    #[schemars(title = "Blend", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub blend: f32,
    /// Also listen to orientation on wide (desktop) viewports.
    #[schemars(skip)]
    pub enabled_on_wide: bool,
}

impl Default for GyroOptions {
    fn default() -> Self {
        Self {
            sensitivity: 0.02,
            blend: 0.05,
            enabled_on_wide: false,
        }
    }
}
