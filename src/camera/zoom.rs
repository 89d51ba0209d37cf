//! Inertial zoom: a target set by device tier and wheel input, and a
//! displayed value that chases it every frame.

use crate::device::DeviceTier;
use crate::options::ZoomOptions;

/// Target and displayed zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    /// Where the zoom is heading.
    pub target: f32,
    /// What the camera shows this frame.
    pub current: f32,
}

/// Owns [`ZoomState`]; everything else reads it.
#[derive(Debug, Clone)]
pub struct ZoomController {
    state: ZoomState,
    options: ZoomOptions,
    initialized: bool,
    wheel_enabled: bool,
}

impl ZoomController {
    /// Create a controller sitting at the wide-tier zoom until the first
    /// [`set_target_for_tier`](Self::set_target_for_tier).
    #[must_use]
    pub fn new(options: ZoomOptions) -> Self {
        let initial = options.wide_zoom;
        Self {
            state: ZoomState {
                target: initial,
                current: initial,
            },
            options,
            initialized: false,
            wheel_enabled: true,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Base zoom for a tier.
    #[must_use]
    pub fn base_zoom(&self, tier: DeviceTier) -> f32 {
        let base = match tier {
            DeviceTier::Narrow => self.options.narrow_zoom,
            DeviceTier::Medium => self.options.medium_zoom,
            DeviceTier::Wide => self.options.wide_zoom,
        };
        self.clamp(base)
    }

    /// Aim at the tier's base zoom. The first call also snaps `current`
    /// so the scene does not open with a zoom animation.
    pub fn set_target_for_tier(&mut self, tier: DeviceTier) {
        let base = self.base_zoom(tier);
        self.state.target = base;
        if !self.initialized {
            self.state.current = base;
            self.initialized = true;
        }
    }

    /// Allow or ignore wheel input (ignored when touch is primary).
    pub fn set_wheel_enabled(&mut self, enabled: bool) {
        self.wheel_enabled = enabled;
    }

    /// Whether wheel input is honored.
    #[must_use]
    pub fn wheel_enabled(&self) -> bool {
        self.wheel_enabled
    }

    /// Nudge the target by a wheel delta (positive scrolls down, zooming
    /// out). Returns `false` when wheel input is disabled.
    pub fn adjust_target(&mut self, wheel_delta_y: f32) -> bool {
        if !self.wheel_enabled {
            return false;
        }
        let step = wheel_delta_y
            * self.options.wheel_sensitivity
            * self.options.wheel_normalization;
        self.state.target = self.clamp(self.state.target - step);
        true
    }

    /// Close a fixed fraction of the gap to the target. Call once per
    /// rendered frame.
    pub fn tick(&mut self) -> f32 {
        self.step(self.smoothing())
    }

    /// Frame-rate independent variant of [`tick`](Self::tick): the
    /// smoothing factor is calibrated for `reference_fps`, and `dt` seconds
    /// close as much of the gap as that many reference frames would.
    pub fn tick_for(&mut self, dt: f32, reference_fps: f32) -> f32 {
        let frames = (dt * reference_fps).max(0.0);
        let alpha = 1.0 - (1.0 - self.smoothing()).powf(frames);
        self.step(alpha)
    }

    fn step(&mut self, alpha: f32) -> f32 {
        let gap = self.state.target - self.state.current;
        self.state.current += gap * alpha.clamp(0.0, 1.0);
        self.state.current
    }

    fn smoothing(&self) -> f32 {
        self.options.smoothing.clamp(f32::EPSILON, 1.0)
    }

    fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.options.min_zoom, self.options.max_zoom)
    }
}
