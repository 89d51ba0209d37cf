use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Zoom", inline)]
#[serde(default)]
/// Orthographic zoom bounds, per-tier defaults and smoothing.
pub struct ZoomOptions {
    /// Lowest zoom the wheel may reach (most zoomed out).
    #[schemars(title = "Min Zoom", range(min = 1.0, max = 200.0), extend("step" = 1.0))]
    pub min_zoom: f32,
    /// Highest zoom the wheel may reach (most zoomed in).
    #[schemars(title = "Max Zoom", range(min = 1.0, max = 200.0), extend("step" = 1.0))]
    pub max_zoom: f32,
    /// Base zoom on narrow (phone) viewports.
    #[schemars(skip)]
    pub narrow_zoom: f32,
    /// Base zoom on medium (tablet) viewports.
    #[schemars(skip)]
    pub medium_zoom: f32,
    /// Base zoom on wide (desktop) viewports.
    #[schemars(skip)]
    pub wide_zoom: f32,
    /// Wheel sensitivity multiplier.
    #[schemars(title = "Wheel Sensitivity", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub wheel_sensitivity: f32,
    /// Converts raw wheel pixels into zoom units.
    #[schemars(skip)]
    pub wheel_normalization: f32,
    /// Fraction of the remaining gap closed per frame (0, 1].
    #[schemars(title = "Smoothing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub smoothing: f32,
    /// Frame rate `smoothing` is calibrated for. `None` applies the factor
    /// once per tick regardless of elapsed time.
    #[schemars(skip)]
    pub reference_fps: Option<f32>,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            min_zoom: 25.0,
            max_zoom: 80.0,
            narrow_zoom: 25.0,
            medium_zoom: 35.0,
            wide_zoom: 40.0,
            wheel_sensitivity: 0.5,
            wheel_normalization: 0.01,
            smoothing: 0.05,
            reference_fps: None,
        }
    }
}
