//! Intro loader choreography.
//!
//! The loader covers the scene while it boots: the heading rises into
//! view, holds for a minimum display time, then the outro plays once
//! (heading exits, the cover's lower edge bends into a curve, flattens, and
//! the whole cover slides away). Hiding is the signal the camera reveal
//! waits for; finishing is the signal to drop the loader entirely.

use super::easing::EasingFunction;
use crate::options::IntroOptions;

/// One eased segment of a timeline, in seconds relative to its phase start.
#[derive(Debug, Clone, Copy)]
struct Step {
    start: f32,
    duration: f32,
    easing: EasingFunction,
}

impl Step {
    const fn new(start: f32, duration: f32, easing: EasingFunction) -> Self {
        Self {
            start,
            duration,
            easing,
        }
    }

    fn end(&self) -> f32 {
        self.start + self.duration
    }

    fn eased(&self, t: f32) -> f32 {
        self.easing.evaluate((t - self.start) / self.duration)
    }
}

const HEADING_IN: Step = Step::new(0.2, 0.8, EasingFunction::PowerOut(3));
const HEADING_OUT: Step = Step::new(0.2, 0.6, EasingFunction::PowerIn(3));
const CURVE: Step = Step::new(0.8, 0.6, EasingFunction::PowerIn(2));
const FLATTEN: Step = Step::new(1.4, 0.6, EasingFunction::PowerOut(2));
const SLIDE: Step = Step::new(2.0, 0.9, EasingFunction::PowerIn(4));

/// Heading offset below its resting line before the intro.
const HEADING_DROP: f32 = 200.0;
/// Heading skew (degrees) while off its resting line.
const HEADING_SKEW: f32 = 20.0;
/// How far the cover travels upward when it slides away.
const SLIDE_DISTANCE: f32 = 1500.0;

/// Coarse loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Visible, intro playing or holding.
    Showing,
    /// Outro playing.
    Leaving,
    /// Gone; safe to unmount.
    Finished,
}

/// Edge-triggered loader notifications. Each fires at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderEvent {
    /// The loader started leaving; the scene may begin its reveal.
    Hidden,
    /// The outro completed.
    Finished,
}

/// Animated values for presenting the loader this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderFrame {
    /// Heading vertical offset in CSS pixels (positive is down).
    pub heading_y: f32,
    /// Heading skew in degrees.
    pub heading_skew: f32,
    /// Progress of the lower edge bending into a curve, 0..=1.
    pub curve: f32,
    /// Progress of the curve flattening out, 0..=1.
    pub flatten: f32,
    /// Cover vertical offset in CSS pixels (negative is up).
    pub slide_y: f32,
}

impl LoaderFrame {
    /// Fraction of the viewport still covered, 1 while showing.
    #[must_use]
    pub fn coverage(&self) -> f32 {
        (1.0 + self.slide_y / SLIDE_DISTANCE).clamp(0.0, 1.0)
    }
}

/// Loader timeline for one mount.
#[derive(Debug, Clone)]
pub struct LoaderTimeline {
    phase: LoaderPhase,
    shown_for: f32,
    leaving_for: f32,
    min_display: f32,
}

impl LoaderTimeline {
    /// Start the intro.
    #[must_use]
    pub fn new(options: &IntroOptions) -> Self {
        Self {
            phase: LoaderPhase::Showing,
            shown_for: 0.0,
            leaving_for: 0.0,
            min_display: options.min_display_secs.max(0.0),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Whether the scene is still covered.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase == LoaderPhase::Showing
    }

    /// Seconds the outro takes.
    #[must_use]
    pub fn outro_secs() -> f32 {
        SLIDE.end()
    }

    /// Begin the outro now if the minimum display time has passed.
    /// Returns [`LoaderEvent::Hidden`] only the first time; an earlier
    /// request is dropped and the loader hides itself on schedule.
    pub fn hide(&mut self) -> Option<LoaderEvent> {
        if self.phase != LoaderPhase::Showing {
            return None;
        }
        if self.shown_for < self.min_display {
            log::debug!(
                "loader hide at {:.2}s deferred to {:.2}s",
                self.shown_for,
                self.min_display
            );
            return None;
        }
        self.phase = LoaderPhase::Leaving;
        self.leaving_for = 0.0;
        log::debug!("loader hiding after {:.2}s", self.shown_for);
        Some(LoaderEvent::Hidden)
    }

    /// Advance by `dt` seconds. Returns the events crossed, in order.
    pub fn tick(&mut self, dt: f32) -> Vec<LoaderEvent> {
        let dt = dt.max(0.0);
        let mut events = Vec::new();
        match self.phase {
            LoaderPhase::Showing => {
                self.shown_for += dt;
                if self.shown_for >= self.min_display {
                    let overshoot = self.shown_for - self.min_display;
                    events.extend(self.hide());
                    self.leaving_for = overshoot;
                    events.extend(self.finish_if_done());
                }
            }
            LoaderPhase::Leaving => {
                self.leaving_for += dt;
                events.extend(self.finish_if_done());
            }
            LoaderPhase::Finished => {}
        }
        events
    }

    fn finish_if_done(&mut self) -> Option<LoaderEvent> {
        if self.phase == LoaderPhase::Leaving
            && self.leaving_for >= Self::outro_secs()
        {
            self.phase = LoaderPhase::Finished;
            log::debug!("loader finished");
            return Some(LoaderEvent::Finished);
        }
        None
    }

    /// Sample the animated values.
    #[must_use]
    pub fn frame(&self) -> LoaderFrame {
        match self.phase {
            LoaderPhase::Showing => {
                let rise = HEADING_IN.eased(self.shown_for);
                LoaderFrame {
                    heading_y: HEADING_DROP * (1.0 - rise),
                    heading_skew: HEADING_SKEW * (1.0 - rise),
                    curve: 0.0,
                    flatten: 0.0,
                    slide_y: 0.0,
                }
            }
            LoaderPhase::Leaving => {
                let t = self.leaving_for;
                let exit = HEADING_OUT.eased(t);
                LoaderFrame {
                    heading_y: -HEADING_DROP * exit,
                    heading_skew: HEADING_SKEW * exit,
                    curve: CURVE.eased(t),
                    flatten: FLATTEN.eased(t),
                    slide_y: -SLIDE_DISTANCE * SLIDE.eased(t),
                }
            }
            LoaderPhase::Finished => LoaderFrame {
                heading_y: -HEADING_DROP,
                heading_skew: HEADING_SKEW,
                curve: 1.0,
                flatten: 1.0,
                slide_y: -SLIDE_DISTANCE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> LoaderTimeline {
        LoaderTimeline::new(&IntroOptions::default())
    }

    #[test]
    fn hides_after_minimum_display_then_finishes() {
        let mut loader = timeline();
        assert!(loader.tick(1.5).is_empty());
        assert!(loader.is_visible());

        // Overshoots the minimum display by 0.1s
        assert_eq!(loader.tick(0.2), vec![LoaderEvent::Hidden]);
        assert_eq!(loader.phase(), LoaderPhase::Leaving);

        assert!(loader.tick(2.7).is_empty());
        assert_eq!(loader.tick(0.2), vec![LoaderEvent::Finished]);
        assert_eq!(loader.phase(), LoaderPhase::Finished);
        assert!(loader.tick(10.0).is_empty());
    }

    #[test]
    fn outro_lasts_2_9_seconds() {
        assert!((LoaderTimeline::outro_secs() - 2.9).abs() < 1e-6);
    }

    #[test]
    fn huge_step_reports_both_events_in_order() {
        let mut loader = timeline();
        assert_eq!(
            loader.tick(10.0),
            vec![LoaderEvent::Hidden, LoaderEvent::Finished]
        );
    }

    #[test]
    fn early_hide_waits_for_minimum_display() {
        let mut loader = timeline();
        assert!(loader.tick(0.2).is_empty());
        assert_eq!(loader.hide(), None);
        assert_eq!(loader.phase(), LoaderPhase::Showing);

        assert!(loader.tick(1.3).is_empty());
        assert!(loader.is_visible());
        assert_eq!(loader.tick(0.2), vec![LoaderEvent::Hidden]);
    }

    #[test]
    fn explicit_hide_plays_the_outro_once() {
        let mut loader = LoaderTimeline::new(&IntroOptions {
            min_display_secs: 0.0,
            ..IntroOptions::default()
        });
        assert_eq!(loader.hide(), Some(LoaderEvent::Hidden));
        assert_eq!(loader.hide(), None);
        // Minimum display no longer matters
        assert!(loader.tick(1.0).is_empty());
    }

    #[test]
    fn heading_rises_into_place() {
        let mut loader = timeline();
        let start = loader.frame();
        assert_eq!(start.heading_y, HEADING_DROP);
        assert_eq!(start.coverage(), 1.0);

        let _ = loader.tick(1.0);
        let settled = loader.frame();
        assert!(settled.heading_y.abs() < 1e-4);
        assert!(settled.heading_skew.abs() < 1e-4);
    }

    #[test]
    fn cover_slides_away_during_the_last_step() {
        let mut loader = timeline();
        let _ = loader.tick(1.6);
        assert_eq!(loader.phase(), LoaderPhase::Leaving);
        let _ = loader.tick(1.9);
        assert_eq!(loader.frame().coverage(), 1.0);
        assert!(loader.frame().curve > 0.99);

        let _ = loader.tick(0.5);
        let frame = loader.frame();
        assert!(frame.coverage() < 1.0 && frame.coverage() > 0.0);

        let _ = loader.tick(1.0);
        assert_eq!(loader.frame().coverage(), 0.0);
    }
}
