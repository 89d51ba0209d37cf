//! Spherical/cartesian conversion around the orbit target.
//!
//! Angles follow the y-up convention: `polar` is measured from +Y,
//! `azimuth` around +Y starting at +Z and turning toward +X.

use glam::Vec3;

/// Keeps the polar angle off the poles where azimuth degenerates.
const POLE_EPSILON: f32 = 1e-6;

/// A point expressed as radius and two angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the origin.
    pub radius: f32,
    /// Angle from +Y in radians, [0, π].
    pub polar: f32,
    /// Angle around +Y in radians, (-π, π].
    pub azimuth: f32,
}

impl Spherical {
    /// Create from raw components.
    #[must_use]
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }

    /// Convert an offset from the origin. The zero vector maps to a zero
    /// radius with both angles at zero.
    #[must_use]
    pub fn from_cartesian(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            polar: (v.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: v.x.atan2(v.z),
        }
    }

    /// Convert back to an offset from the origin.
    #[must_use]
    pub fn to_cartesian(self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        Vec3::new(
            self.radius * sin_polar * sin_az,
            self.radius * cos_polar,
            self.radius * sin_polar * cos_az,
        )
    }

    /// Pull the polar angle off the poles.
    #[must_use]
    pub fn make_safe(mut self) -> Self {
        self.polar = self
            .polar
            .clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);
        self
    }
}
