use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Device", inline)]
#[serde(default)]
/// Viewport width breakpoints (CSS pixels) between device tiers.
pub struct DeviceOptions {
    /// Widths up to and including this value are narrow.
    pub narrow_max_width: f32,
    /// Widths up to and including this value (and above narrow) are medium.
    pub medium_max_width: f32,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            narrow_max_width: 768.0,
            medium_max_width: 1024.0,
        }
    }
}
