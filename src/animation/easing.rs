//! Easing functions for tween and timeline interpolation.
//!
//! Curves follow the `powerN` family used by web animation tooling:
//! `power1` is quadratic, `power2` cubic, `power3` quartic, `power4`
//! quintic. Each comes in `in`, `out` and `inOut` flavors and is written as
//! `"power2.inOut"` in options files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Slow start, fast end.
    PowerIn(u8),
    /// Fast start, slow end.
    PowerOut(u8),
    /// Slow at both ends, symmetric around t = 0.5.
    PowerInOut(u8),
}

impl EasingFunction {
    /// Default easing function: `power2.inOut`.
    pub const DEFAULT: EasingFunction = EasingFunction::PowerInOut(2);

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            EasingFunction::Linear => t,
            EasingFunction::PowerIn(n) => t.powi(exponent(n)),
            EasingFunction::PowerOut(n) => 1.0 - (1.0 - t).powi(exponent(n)),
            EasingFunction::PowerInOut(n) => {
                let p = exponent(n);
                if t < 0.5 {
                    (2.0 * t).powi(p) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(p) / 2.0
                }
            }
        }
    }
}

/// `powerN` raises to N + 1; `power0` degenerates to linear.
#[inline]
fn exponent(n: u8) -> i32 {
    i32::from(n) + 1
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "none"),
            Self::PowerIn(n) => write!(f, "power{n}.in"),
            Self::PowerOut(n) => write!(f, "power{n}.out"),
            Self::PowerInOut(n) => write!(f, "power{n}.inOut"),
        }
    }
}

impl FromStr for EasingFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" || s == "linear" {
            return Ok(Self::Linear);
        }
        let (family, mode) = s.split_once('.').unwrap_or((s, "out"));
        let n: u8 = family
            .strip_prefix("power")
            .and_then(|digits| digits.parse().ok())
            .filter(|n| *n <= 4)
            .ok_or_else(|| format!("unknown easing '{s}'"))?;
        match mode {
            "in" => Ok(Self::PowerIn(n)),
            "out" => Ok(Self::PowerOut(n)),
            "inOut" => Ok(Self::PowerInOut(n)),
            _ => Err(format!("unknown easing mode '{mode}' in '{s}'")),
        }
    }
}

impl TryFrom<String> for EasingFunction {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EasingFunction> for String {
    fn from(value: EasingFunction) -> Self {
        value.to_string()
    }
}
