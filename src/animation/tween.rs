//! One-shot position tweens and the driver that advances them.
//!
//! A tween never touches the camera. It writes into a caller-owned
//! position record; the pose blender decides when that record reaches the
//! camera.

use glam::Vec3;

use super::easing::EasingFunction;
use crate::options::IntroOptions;

/// Where a tween is in its lifetime after an [`advance`](PositionTween::advance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenStatus {
    /// Still inside the start delay; the record is untouched.
    Waiting,
    /// Interpolating.
    Running,
    /// Reached the end value. Further advances are no-ops.
    Completed,
}

/// Delayed, eased move of a position record toward a fixed end value.
///
/// The start value is captured from the record when the delay elapses, so
/// whatever the record holds at that moment is where the motion begins.
#[derive(Debug, Clone)]
pub struct PositionTween {
    to: Vec3,
    from: Option<Vec3>,
    delay: f32,
    duration: f32,
    easing: EasingFunction,
    elapsed: f32,
}

impl PositionTween {
    /// Create a tween toward `to`. Negative times are treated as zero.
    #[must_use]
    pub fn new(
        to: Vec3,
        delay_secs: f32,
        duration_secs: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            to,
            from: None,
            delay: delay_secs.max(0.0),
            duration: duration_secs.max(0.0),
            easing,
            elapsed: 0.0,
        }
    }

    /// The loader-to-scene camera reveal.
    #[must_use]
    pub fn reveal(options: &IntroOptions) -> Self {
        Self::new(
            Vec3::from_array(options.rest),
            options.delay_secs,
            options.duration_secs,
            options.easing,
        )
    }

    /// Seconds from start to completion, delay included.
    #[must_use]
    pub fn total_secs(&self) -> f32 {
        self.delay + self.duration
    }

    /// End value.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.to
    }

    /// Raw (uneased) progress through the motion, 0 during the delay.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// Advance by `dt` seconds and write the interpolated value into
    /// `record`.
    pub fn advance(&mut self, dt: f32, record: &mut Vec3) -> TweenStatus {
        if self.elapsed >= self.total_secs() && self.from.is_some() {
            return TweenStatus::Completed;
        }
        self.elapsed += dt.max(0.0);

        if self.elapsed <= self.delay && self.duration > 0.0 {
            return TweenStatus::Waiting;
        }
        let from = *self.from.get_or_insert(*record);

        if self.elapsed >= self.total_secs() {
            *record = self.to;
            return TweenStatus::Completed;
        }
        let eased = self.easing.evaluate(self.progress());
        *record = from + (self.to - from) * eased;
        TweenStatus::Running
    }
}

/// Owns the running tweens of one scene instance.
///
/// Scenes create the driver lazily, the first time something needs to
/// animate, and kill it on unmount so no tween outlives the camera it was
/// moving.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    active: Option<PositionTween>,
    played: u32,
}

impl AnimationDriver {
    /// Create an idle driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween`, replacing any tween still running.
    pub fn play(&mut self, tween: PositionTween) {
        if self.active.is_some() {
            log::debug!("replacing running tween");
        }
        self.active = Some(tween);
        self.played += 1;
    }

    /// Advance the running tween, if any. Completed tweens are dropped.
    pub fn advance(&mut self, dt: f32, record: &mut Vec3) -> Option<TweenStatus> {
        let tween = self.active.as_mut()?;
        let status = tween.advance(dt, record);
        if status == TweenStatus::Completed {
            self.active = None;
        }
        Some(status)
    }

    /// Whether a tween is waiting or running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// How many tweens were started on this driver.
    #[must_use]
    pub fn played(&self) -> u32 {
        self.played
    }

    /// Stop everything without writing a final value.
    pub fn kill_all(&mut self) {
        if self.active.take().is_some() {
            log::debug!("killed running tween");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Vec3 = Vec3::new(1.0, 20.0, 50.0);
    const REST: Vec3 = Vec3::new(10.0, 20.0, 20.0);

    fn reveal() -> PositionTween {
        PositionTween::reveal(&IntroOptions::default())
    }

    #[test]
    fn reveal_is_untouched_through_the_delay() {
        let mut tween = reveal();
        let mut record = START;
        assert_eq!(tween.advance(0.4, &mut record), TweenStatus::Waiting);
        assert_eq!(record, START);
    }

    #[test]
    fn reveal_lands_on_rest_by_1_9_seconds() {
        let mut tween = reveal();
        let mut record = START;
        let _ = tween.advance(0.4, &mut record);
        assert_eq!(tween.advance(1.5, &mut record), TweenStatus::Completed);
        assert!((record - REST).length() < 1e-5);
        assert!((tween.total_secs() - 1.9).abs() < 1e-6);
    }

    #[test]
    fn reveal_at_frame_rate_matches_timing() {
        let mut tween = reveal();
        let mut record = START;
        let dt = 1.0 / 60.0;
        let mut t = 0.0;
        let mut last = TweenStatus::Waiting;
        while t < 2.0 {
            last = tween.advance(dt, &mut record);
            t += dt;
            if t <= 0.4 - dt {
                assert_eq!(record, START, "moved during delay at t={t}");
            }
        }
        assert_eq!(last, TweenStatus::Completed);
        assert!((record - REST).length() < 1e-5);
    }

    #[test]
    fn midpoint_follows_the_easing() {
        let mut tween = reveal();
        let mut record = START;
        let _ = tween.advance(0.4 + 0.75, &mut record);
        // power2.inOut is 0.5 at the midpoint
        let expected = START + (REST - START) * 0.5;
        assert!((record - expected).length() < 1e-4);
    }

    #[test]
    fn start_is_captured_when_the_delay_ends() {
        let mut tween = PositionTween::new(
            Vec3::ZERO,
            0.5,
            1.0,
            EasingFunction::Linear,
        );
        let mut record = Vec3::X;
        let _ = tween.advance(0.25, &mut record);
        record = Vec3::Y;
        let _ = tween.advance(0.75, &mut record);
        assert!((record - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn zero_duration_snaps_after_delay() {
        let mut tween =
            PositionTween::new(REST, 0.0, 0.0, EasingFunction::Linear);
        let mut record = START;
        assert_eq!(tween.advance(0.0, &mut record), TweenStatus::Completed);
        assert_eq!(record, REST);
    }

    #[test]
    fn driver_drops_completed_and_killed_tweens() {
        let mut driver = AnimationDriver::new();
        let mut record = START;
        assert_eq!(driver.advance(0.1, &mut record), None);

        driver.play(reveal());
        assert!(driver.is_active());
        assert_eq!(driver.advance(2.0, &mut record), Some(TweenStatus::Completed));
        assert!(!driver.is_active());

        record = START;
        driver.play(reveal());
        let _ = driver.advance(1.0, &mut record);
        let mid = record;
        driver.kill_all();
        assert_eq!(driver.advance(1.0, &mut record), None);
        assert_eq!(record, mid);
        assert_eq!(driver.played(), 2);
    }
}
