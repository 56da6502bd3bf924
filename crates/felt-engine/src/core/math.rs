//! Small vector helpers on top of glam.
//!
//! Everything here is pure and deterministic. Degenerate inputs follow the
//! zero-vector policy: normalizing a zero-length vector yields the zero
//! vector, never a division by zero.

use glam::Vec2;

/// Scale `v` to exactly `magnitude`, preserving direction.
/// The zero vector stays zero regardless of the requested magnitude.
#[inline]
pub fn set_magnitude(v: Vec2, magnitude: f32) -> Vec2 {
    v.normalize_or_zero() * magnitude
}

/// Rotate `v` counter-clockwise by `radians`.
#[inline]
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}

/// Angle of `v` in radians, measured from the +X axis.
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vector_normalizes_to_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
        assert_eq!(set_magnitude(Vec2::ZERO, 100.0), Vec2::ZERO);
    }

    #[test]
    fn set_magnitude_preserves_direction() {
        let v = set_magnitude(Vec2::new(3.0, 4.0), 10.0);
        assert!((v.length() - 10.0).abs() < 1e-4);
        assert!((v.x - 6.0).abs() < 1e-4);
        assert!((v.y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn angle_of_axes() {
        assert!(angle_of(Vec2::X).abs() < 1e-6);
        assert!((angle_of(Vec2::Y) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Vec2::new(0.0, 0.0).lerp(Vec2::new(10.0, 20.0), 0.5);
        assert_eq!(mid, Vec2::new(5.0, 10.0));
    }
}
