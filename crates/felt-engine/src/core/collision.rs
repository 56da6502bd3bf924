//! Pairwise collision primitives: overlap tests, contact normals, impulses.
//!
//! The resolver is deliberately simple: on contact the moving body rolls
//! back to its pre-step position and receives a reflecting force along the
//! contact normal. The impulse magnitude divides by `dt` and is applied
//! through the acceleration pipeline, where integration multiplies by `dt`
//! again, so the net velocity change is frame-rate stable for a fixed step.

use glam::Vec2;

/// Fraction of relative velocity preserved through a collision.
pub const ELASTICITY: f32 = 0.9;

/// Axis-aligned rectangle, `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Whether two rectangles overlap (touching edges do not count).
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }

    /// The overlapping region of two rectangles, if any.
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let min = self.min.max(other.min);
        let max = self.max().min(other.max());
        if min.x < max.x && min.y < max.y {
            Some(Rect::new(min, max - min))
        } else {
            None
        }
    }
}

/// A sub-region of a solid body's bounding box tagged with the outward
/// direction of the face it covers. Used to pick the contact normal.
#[derive(Debug, Clone, Copy)]
pub struct NormalZone {
    pub zone: Rect,
    pub normal: Vec2,
}

/// Circle-circle overlap via squared center distance. Inclusive: circles
/// exactly touching count as colliding.
#[inline]
pub fn circles_collide(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    c1.distance_squared(c2) <= reach * reach
}

/// Resolve the contact normal from the struck body's tagged zones.
///
/// The first zone intersecting the overlap region wins. When no zone
/// matches (or the body has none, as balls do), fall back to the direction
/// between the two centers.
pub fn contact_normal(
    overlap: &Rect,
    zones: &[NormalZone],
    self_center: Vec2,
    struck_center: Vec2,
) -> Vec2 {
    for z in zones {
        if overlap.intersects(&z.zone) {
            return z.normal;
        }
    }
    (self_center - struck_center).normalize_or_zero()
}

/// Impulse magnitude along the contact normal.
///
/// `2 * elasticity * (v_rel . n) / dt`, negated so the force opposes the
/// approach. Only the velocity component going against the normal is
/// reflected, hence the dot product.
#[inline]
pub fn impulse_magnitude(normal: Vec2, relative_velocity: Vec2, dt: f32) -> f32 {
    -normal.dot(relative_velocity) * 2.0 * ELASTICITY / dt
}

/// This body's share of the reaction, proportional to the other body's
/// fraction of the total mass. Mass 0 means immovable: the massless side
/// absorbs nothing and the moving side gets the full reaction.
///
/// Returns `None` for the unreachable both-massless pairing so callers can
/// skip it defensively.
pub fn reaction_share(self_mass: f32, other_mass: f32) -> Option<f32> {
    if other_mass == 0.0 {
        if self_mass == 0.0 {
            return None;
        }
        return Some(1.0);
    }
    Some(other_mass / (self_mass + other_mass))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circles_touching_collide() {
        // Radius 15 each: centers exactly 30 apart collide, 30.01 apart do not.
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_collide(a, 15.0, Vec2::new(30.0, 0.0), 15.0));
        assert!(!circles_collide(a, 15.0, Vec2::new(30.01, 0.0), 15.0));
    }

    #[test]
    fn rect_intersects_and_clips() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        let clip = a.clip(&b).unwrap();
        assert_eq!(clip.min, Vec2::new(5.0, 5.0));
        assert_eq!(clip.size, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn rect_edge_touch_is_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
        assert!(a.clip(&b).is_none());
    }

    #[test]
    fn zone_normal_wins_over_fallback() {
        let zones = [NormalZone {
            zone: Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 5.0)),
            normal: Vec2::new(0.0, -1.0),
        }];
        let overlap = Rect::new(Vec2::new(40.0, 2.0), Vec2::new(10.0, 3.0));
        let n = contact_normal(&overlap, &zones, Vec2::new(45.0, -10.0), Vec2::new(50.0, 25.0));
        assert_eq!(n, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn fallback_normal_points_between_centers() {
        let overlap = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let n = contact_normal(&overlap, &[], Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.0));
        assert!((n - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn impulse_opposes_approach() {
        // Moving right into a left-pointing face normal: the impulse must
        // push back along that normal.
        let n = Vec2::new(-1.0, 0.0);
        let mag = impulse_magnitude(n, Vec2::new(100.0, 0.0), 1.0 / 60.0);
        assert!(mag > 0.0);
        // Reflected velocity change after one integration step: 2*e*|v|.
        let dv = mag * (1.0 / 60.0);
        assert!((dv - 180.0).abs() < 1e-3);
    }

    #[test]
    fn reaction_share_against_immovable_is_full() {
        assert_eq!(reaction_share(1.0, 0.0), Some(1.0));
    }

    #[test]
    fn reaction_share_equal_masses_is_half() {
        assert_eq!(reaction_share(1.0, 1.0), Some(0.5));
    }

    #[test]
    fn reaction_share_massless_pair_is_guarded() {
        assert_eq!(reaction_share(0.0, 0.0), None);
    }
}
