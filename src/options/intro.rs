use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Intro", inline)]
#[serde(default)]
/// Loader timing and the loader-to-scene camera reveal.
pub struct IntroOptions {
    /// Camera position while the loader covers the scene.
    #[schemars(skip)]
    pub start: [f32; 3],
    /// Camera position the reveal tween settles on.
    #[schemars(skip)]
    pub rest: [f32; 3],
    /// Seconds between the loader hiding and the camera starting to move.
    #[schemars(title = "Reveal Delay", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub delay_secs: f32,
    /// Seconds the camera reveal takes once it starts.
    #[schemars(title = "Reveal Duration", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub duration_secs: f32,
    /// Easing curve of the reveal, in `powerN.mode` notation.
    #[schemars(with = "String")]
    pub easing: EasingFunction,
    /// Minimum time the loader stays up before it starts hiding.
    #[schemars(skip)]
    pub min_display_secs: f32,
    /// Text shown in the loader.
    #[schemars(skip)]
    pub heading: String,
}

impl Default for IntroOptions {
    fn default() -> Self {
        Self {
            start: [1.0, 20.0, 50.0],
            rest: [10.0, 20.0, 20.0],
            delay_secs: 0.4,
            duration_secs: 1.5,
            easing: EasingFunction::PowerInOut(2),
            min_display_secs: 1.6,
            heading: "UGD".to_owned(),
        }
    }
}
