//! Device-orientation samples and the per-mount baseline.

/// One device-orientation reading, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSample {
    /// Rotation around the z axis (compass heading), 0..360.
    pub alpha: f32,
    /// Front-to-back tilt, -180..180.
    pub beta: f32,
    /// Left-to-right roll, -90..90.
    pub gamma: f32,
}

impl OrientationSample {
    /// Build a sample from a platform event whose fields may be missing.
    /// Returns `None` unless all three angles are present and finite.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_event(
        alpha: Option<f64>,
        beta: Option<f64>,
        gamma: Option<f64>,
    ) -> Option<Self> {
        let (alpha, beta, gamma) = (alpha?, beta?, gamma?);
        if !(alpha.is_finite() && beta.is_finite() && gamma.is_finite()) {
            return None;
        }
        Some(Self {
            alpha: alpha as f32,
            beta: beta as f32,
            gamma: gamma as f32,
        })
    }
}

/// Latest reading plus the first reading of the mount.
///
/// The baseline maps the device attitude at first contact onto the camera
/// attitude at that moment, so tilt is always measured relative to how the
/// user was holding the device and the camera never jumps to an absolute
/// orientation.
#[derive(Debug, Clone, Default)]
pub struct OrientationTracker {
    baseline: Option<OrientationSample>,
    latest: Option<OrientationSample>,
    samples: u64,
}

impl OrientationTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading. The first reading becomes the baseline and is
    /// never replaced.
    pub fn record(&mut self, sample: OrientationSample) {
        if self.baseline.is_none() {
            log::debug!(
                "orientation baseline captured (gamma {:.1}°)",
                sample.gamma
            );
            self.baseline = Some(sample);
        }
        self.latest = Some(sample);
        self.samples += 1;
    }

    /// First reading of the mount.
    #[must_use]
    pub fn baseline(&self) -> Option<OrientationSample> {
        self.baseline
    }

    /// Most recent reading.
    #[must_use]
    pub fn latest(&self) -> Option<OrientationSample> {
        self.latest
    }

    /// Number of readings recorded.
    #[must_use]
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Roll relative to the baseline, in radians. `None` until the first
    /// reading arrives.
    #[must_use]
    pub fn gamma_delta(&self) -> Option<f32> {
        let baseline = self.baseline?;
        let latest = self.latest?;
        Some((latest.gamma - baseline.gamma).to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(gamma: f32) -> OrientationSample {
        OrientationSample {
            alpha: 0.0,
            beta: 45.0,
            gamma,
        }
    }

    #[test]
    fn no_delta_before_first_reading() {
        assert_eq!(OrientationTracker::new().gamma_delta(), None);
    }

    #[test]
    fn baseline_is_set_once() {
        let mut tracker = OrientationTracker::new();
        tracker.record(sample(10.0));
        tracker.record(sample(40.0));
        tracker.record(sample(-5.0));
        assert_eq!(tracker.baseline(), Some(sample(10.0)));
        assert_eq!(tracker.latest(), Some(sample(-5.0)));
        assert_eq!(tracker.samples(), 3);
    }

    #[test]
    fn delta_is_relative_to_baseline_in_radians() {
        let mut tracker = OrientationTracker::new();
        tracker.record(sample(10.0));
        assert_eq!(tracker.gamma_delta(), Some(0.0));
        tracker.record(sample(40.0));
        let delta = tracker.gamma_delta().unwrap();
        assert!((delta - 0.523_598_8).abs() < 1e-5);
    }

    #[test]
    fn incomplete_events_are_dropped() {
        assert_eq!(OrientationSample::from_event(Some(1.0), None, Some(2.0)), None);
        assert_eq!(
            OrientationSample::from_event(Some(1.0), Some(f64::NAN), Some(2.0)),
            None
        );
        assert_eq!(
            OrientationSample::from_event(Some(1.0), Some(2.0), Some(3.0)),
            Some(OrientationSample { alpha: 1.0, beta: 2.0, gamma: 3.0 })
        );
    }
}
