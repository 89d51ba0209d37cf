//! Viewport-driven device classification.
//!
//! The tier picks zoom defaults and render quality; the capability flags
//! decide which inputs (wheel, tilt) are meaningful. Absence of a feature is
//! an ordinary classification, never an error.

use crate::options::{DeviceOptions, GyroOptions};

/// Discrete viewport class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceTier {
    /// Phones: width up to the narrow breakpoint.
    Narrow,
    /// Tablets: width up to the medium breakpoint.
    Medium,
    /// Desktops: anything wider.
    Wide,
}

impl DeviceTier {
    /// Classify a viewport width in CSS pixels.
    #[must_use]
    pub fn from_width(width: f32, options: &DeviceOptions) -> Self {
        if width <= options.narrow_max_width {
            Self::Narrow
        } else if width <= options.medium_max_width {
            Self::Medium
        } else {
            Self::Wide
        }
    }

    /// Rendering budget appropriate for the tier.
    #[must_use]
    pub fn quality(self) -> RenderQuality {
        match self {
            Self::Narrow => RenderQuality {
                environment_resolution: 64,
                shadow_map_size: 512,
            },
            Self::Medium => RenderQuality {
                environment_resolution: 128,
                shadow_map_size: 1024,
            },
            Self::Wide => RenderQuality {
                environment_resolution: 256,
                shadow_map_size: 1024,
            },
        }
    }
}

/// Texture budgets derived from the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderQuality {
    /// Edge length of the environment cube map.
    pub environment_resolution: u32,
    /// Edge length of the key light's shadow map.
    pub shadow_map_size: u32,
}

/// Feature-detected input capabilities. Detection only: whether the user
/// granted sensor access is tracked by the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceCapabilities {
    /// The platform exposes device-orientation events.
    pub has_orientation_sensor: bool,
    /// Touch is the primary pointer, so wheel events are not meaningful.
    pub touch_primary: bool,
}

/// Tier plus capabilities at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Viewport class.
    pub tier: DeviceTier,
    /// Input capabilities.
    pub capabilities: DeviceCapabilities,
}

impl DeviceProfile {
    /// Wheel input drives zoom.
    #[must_use]
    pub fn wheel_zoom_enabled(&self) -> bool {
        !self.capabilities.touch_primary
    }

    /// Device tilt drives the orbit.
    #[must_use]
    pub fn gyro_enabled(&self, options: &GyroOptions) -> bool {
        let tier_allows =
            self.tier != DeviceTier::Wide || options.enabled_on_wide;
        tier_allows && self.capabilities.has_orientation_sensor
    }

    /// Grab/grabbing cursor feedback applies.
    #[must_use]
    pub fn cursor_feedback(&self) -> bool {
        self.tier == DeviceTier::Wide
    }
}

/// Tracks the current profile across resizes.
#[derive(Debug, Clone)]
pub struct DeviceClassifier {
    options: DeviceOptions,
    width: f32,
    profile: DeviceProfile,
}

impl DeviceClassifier {
    /// Classify the initial viewport.
    #[must_use]
    pub fn new(
        options: DeviceOptions,
        width: f32,
        capabilities: DeviceCapabilities,
    ) -> Self {
        let tier = DeviceTier::from_width(width, &options);
        Self {
            options,
            width,
            profile: DeviceProfile { tier, capabilities },
        }
    }

    /// Re-classify after a resize. Returns the new profile when the tier or
    /// capabilities changed.
    pub fn observe(
        &mut self,
        width: f32,
        capabilities: DeviceCapabilities,
    ) -> Option<DeviceProfile> {
        self.width = width;
        let next = DeviceProfile {
            tier: DeviceTier::from_width(width, &self.options),
            capabilities,
        };
        if next == self.profile {
            return None;
        }
        if next.tier != self.profile.tier {
            log::debug!(
                "device tier {:?} -> {:?} at {width}px",
                self.profile.tier,
                next.tier
            );
        }
        self.profile = next;
        Some(next)
    }

    /// Current profile.
    #[must_use]
    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    /// Current tier.
    #[must_use]
    pub fn tier(&self) -> DeviceTier {
        self.profile.tier
    }

    /// Last observed viewport width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(width: f32) -> DeviceTier {
        DeviceTier::from_width(width, &DeviceOptions::default())
    }

    #[test]
    fn breakpoints_are_inclusive_upper_bounds() {
        assert_eq!(tier(320.0), DeviceTier::Narrow);
        assert_eq!(tier(768.0), DeviceTier::Narrow);
        assert_eq!(tier(769.0), DeviceTier::Medium);
        assert_eq!(tier(1024.0), DeviceTier::Medium);
        assert_eq!(tier(1025.0), DeviceTier::Wide);
    }

    #[test]
    fn quality_scales_with_tier() {
        assert_eq!(DeviceTier::Narrow.quality().environment_resolution, 64);
        assert_eq!(DeviceTier::Narrow.quality().shadow_map_size, 512);
        assert_eq!(DeviceTier::Medium.quality().environment_resolution, 128);
        assert_eq!(DeviceTier::Wide.quality().environment_resolution, 256);
        assert_eq!(DeviceTier::Wide.quality().shadow_map_size, 1024);
    }

    #[test]
    fn gyro_needs_a_sensor_and_a_handheld_tier() {
        let sensor = DeviceCapabilities {
            has_orientation_sensor: true,
            touch_primary: true,
        };
        let gyro = GyroOptions::default();
        let phone = DeviceProfile {
            tier: DeviceTier::Narrow,
            capabilities: sensor,
        };
        assert!(phone.gyro_enabled(&gyro));

        let desktop = DeviceProfile {
            tier: DeviceTier::Wide,
            capabilities: sensor,
        };
        assert!(!desktop.gyro_enabled(&gyro));

        let no_sensor = DeviceProfile {
            tier: DeviceTier::Narrow,
            capabilities: DeviceCapabilities::default(),
        };
        assert!(!no_sensor.gyro_enabled(&gyro));
    }

    #[test]
    fn observe_reports_only_changes() {
        let caps = DeviceCapabilities::default();
        let mut classifier =
            DeviceClassifier::new(DeviceOptions::default(), 1200.0, caps);
        assert_eq!(classifier.tier(), DeviceTier::Wide);

        assert_eq!(classifier.observe(1300.0, caps), None);
        let changed = classifier.observe(600.0, caps).unwrap();
        assert_eq!(changed.tier, DeviceTier::Narrow);
        assert_eq!(classifier.width(), 600.0);
    }
}
