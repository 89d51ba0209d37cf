//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (zoom, gyroscope, intro choreography, orbit rig,
//! device breakpoints, overlay) are consolidated here. Options serialize
//! to/from TOML so a deployment can ship presets next to the binary.

mod device;
mod gyro;
mod intro;
mod orbit;
mod overlay;
mod zoom;

use std::path::Path;

pub use device::DeviceOptions;
pub use gyro::GyroOptions;
pub use intro::IntroOptions;
pub use orbit::OrbitOptions;
pub use overlay::OverlayOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use zoom::ZoomOptions;

use crate::error::SceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[zoom]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Zoom bounds, tier defaults and smoothing.
    pub zoom: ZoomOptions,
    /// Gyroscope blending.
    pub gyro: GyroOptions,
    /// Loader timing and camera reveal.
    pub intro: IntroOptions,
    /// Drag-orbit rig.
    pub orbit: OrbitOptions,
    /// Device tier breakpoints.
    #[schemars(skip)]
    pub device: DeviceOptions,
    /// Overlay text and last-visit lookup.
    #[schemars(skip)]
    pub overlay: OverlayOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path).map_err(SceneError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, SceneError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SceneError::Io)?;
        }
        std::fs::write(path, content).map_err(SceneError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Reject combinations the controllers cannot honor.
    fn validate(&self) -> Result<(), SceneError> {
        let zoom = &self.zoom;
        if !(zoom.min_zoom > 0.0 && zoom.min_zoom <= zoom.max_zoom) {
            return Err(SceneError::OptionsParse(format!(
                "zoom bounds must satisfy 0 < min_zoom <= max_zoom (got {} \
                 and {})",
                zoom.min_zoom, zoom.max_zoom
            )));
        }
        if !(zoom.smoothing > 0.0 && zoom.smoothing <= 1.0) {
            return Err(SceneError::OptionsParse(format!(
                "zoom.smoothing must lie in (0, 1] (got {})",
                zoom.smoothing
            )));
        }
        if self.orbit.min_polar > self.orbit.max_polar {
            return Err(SceneError::OptionsParse(
                "orbit.min_polar exceeds orbit.max_polar".to_owned(),
            ));
        }
        if self.orbit.enable_zoom || self.orbit.enable_pan {
            return Err(SceneError::OptionsParse(
                "orbit.enable_zoom and orbit.enable_pan must stay false"
                    .to_owned(),
            ));
        }
        if self.device.narrow_max_width > self.device.medium_max_width {
            return Err(SceneError::OptionsParse(
                "device.narrow_max_width exceeds device.medium_max_width"
                    .to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[zoom]
smoothing = 0.08
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.zoom.smoothing, 0.08);
        // Everything else should be default
        assert_eq!(opts.zoom.max_zoom, 80.0);
        assert_eq!(opts.gyro.sensitivity, 0.02);
        assert_eq!(opts.intro.rest, [10.0, 20.0, 20.0]);
    }

    #[test]
    fn easing_is_written_in_power_notation() {
        let toml_str = r#"
[intro]
easing = "power3.out"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.intro.easing, EasingFunction::PowerOut(3));

        let written = toml::to_string_pretty(&Options::default()).unwrap();
        assert!(written.contains("easing = \"power2.inOut\""));
    }

    #[test]
    fn inverted_zoom_bounds_are_rejected() {
        let toml_str = r"
[zoom]
min_zoom = 90.0
max_zoom = 80.0
";
        assert!(matches!(
            Options::from_toml(toml_str),
            Err(SceneError::OptionsParse(_))
        ));
    }

    #[test]
    fn orbit_zoom_and_pan_stay_disabled() {
        let opts = Options::from_toml("[orbit]\ndamping = 0.05\n").unwrap();
        assert!(!opts.orbit.enable_zoom);
        assert!(!opts.orbit.enable_pan);

        for key in ["enable_zoom", "enable_pan"] {
            let toml_str = format!("[orbit]\n{key} = true\n");
            assert!(matches!(
                Options::from_toml(&toml_str),
                Err(SceneError::OptionsParse(_))
            ));
        }
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("ugd-scene-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.gyro.sensitivity = 0.04;
        opts.save(&dir.join("tilty.toml")).unwrap();

        let loaded = Options::load(&dir.join("tilty.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["tilty".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("zoom"));
        assert!(props.contains_key("gyro"));
        assert!(props.contains_key("intro"));
        assert!(props.contains_key("orbit"));

        // Skipped sections should be absent
        assert!(!props.contains_key("device"));
        assert!(!props.contains_key("overlay"));

        let zoom = &props["zoom"]["properties"];
        assert!(zoom.get("smoothing").is_some());
        assert!(zoom.get("narrow_zoom").is_none());
    }
}
