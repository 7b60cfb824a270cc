//! # carapace_math - 2D Math Primitives
//!
//! Vectors and angle helpers for a side-on 2D world: +X is right, +Y is up.

pub mod vector;

pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = std::f32::consts::PI;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unsigned angle between two vectors in degrees (0..=180).
///
/// Returns 0 when either vector has zero length.
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let mag = a.length() * b.length();
    if mag <= consts::EPSILON {
        return 0.0;
    }
    let cos_angle = (a.dot(b) / mag).clamp(-1.0, 1.0);
    degrees(cos_angle.acos())
}

pub mod prelude {
    pub use crate::vector::{Facing, Vec2};
    pub use crate::{angle_between, degrees, lerp, radians};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_between() {
        assert_relative_eq!(angle_between(Vec2::X, Vec2::Y), 90.0, epsilon = 1e-4);
        assert_relative_eq!(angle_between(Vec2::X, -Vec2::X), 180.0, epsilon = 1e-4);
        assert_relative_eq!(angle_between(Vec2::X, Vec2::new(3.0, 0.0)), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_angle_with_zero_vector() {
        assert_eq!(angle_between(Vec2::ZERO, Vec2::X), 0.0);
    }

    #[test]
    fn test_radians_roundtrip() {
        assert_relative_eq!(degrees(radians(45.0)), 45.0, epsilon = 1e-5);
    }
}
