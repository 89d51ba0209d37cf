//! Animation system: easing curves, the one-shot camera tween and the
//! intro loader timeline.

pub mod easing;
pub mod loader;
pub mod tween;

pub use easing::EasingFunction;
pub use loader::{LoaderEvent, LoaderFrame, LoaderPhase, LoaderTimeline};
pub use tween::{AnimationDriver, PositionTween, TweenStatus};
