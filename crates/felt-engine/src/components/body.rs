//! Fat body struct: one type for every object on the table.
//!
//! Variants (cue ball, the four scoring ball kinds, walls) share the same
//! struct and differ through the `BodyKind`/`BallKind` tags, which carry
//! only data: point values, solidity, radius, respawn policy. Designed for
//! simplicity over ECS purity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::core::collision::{NormalZone, Rect};
use crate::core::math::set_magnitude;
use crate::extensions::easing::Easing;
use crate::renderer::draw::Color;

/// Friction deceleration for moving bodies, px/s².
pub const FRICTION: f32 = 200.0;

/// Cue ball radius, px.
pub const PLAYER_RADIUS: f32 = 10.0;

/// Squared speed below which a body is stopped outright.
/// Fifty is the *square* magnitude, so this is roughly 7 px/s. Slower
/// than that reads as standing still and only causes endless micro-sliding.
pub const STOP_THRESHOLD_SQ: f32 = 50.0;

/// Duration of the respawn scale-up animation, seconds.
pub const RESPAWN_DURATION: f32 = 0.125;

/// Depth of the normal-zone strips along each wall face, px.
const NORMAL_ZONE_DEPTH: f32 = 5.0;

/// The four scoring ball classes. Behaviour differs only by data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallKind {
    /// Common ball: small score, gone for good once potted. Clearing the
    /// whole red set respawns the lot.
    Red,
    /// Respawns after every shot, medium score.
    Blue,
    /// Penalty ball: respawns, subtracts from the score (floored at 0).
    Black,
    /// Bonus ball: respawns, biggest per-ball score, never blocks anyone.
    Gold,
}

impl BallKind {
    /// Awarded when the last red on the table is potted, replacing the
    /// per-ball score.
    pub const CLEAR_BONUS: i32 = 1000;

    /// Score change when potted. Negative for the penalty ball.
    pub fn score_delta(self) -> i32 {
        match self {
            BallKind::Red => 100,
            BallKind::Blue => 250,
            BallKind::Black => -500,
            BallKind::Gold => 500,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            BallKind::Gold => 12.0,
            _ => 15.0,
        }
    }

    /// Non-solid balls are still pot targets and still bounce off solids,
    /// but other bodies pass straight through them.
    pub fn solid(self) -> bool {
        !matches!(self, BallKind::Gold)
    }

    /// Whether a potted ball of this kind comes back once the shot ends.
    pub fn respawns_each_shot(self) -> bool {
        matches!(self, BallKind::Blue | BallKind::Black | BallKind::Gold)
    }

    /// Reds respawn as a full set when the last one is potted.
    pub fn clears_as_group(self) -> bool {
        matches!(self, BallKind::Red)
    }

    pub fn label(self) -> &'static str {
        match self {
            BallKind::Red => "red",
            BallKind::Blue => "blue",
            BallKind::Black => "black",
            BallKind::Gold => "gold",
        }
    }
}

/// What a body is. Solidity is kind-level, not per-instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Player,
    Ball(BallKind),
    Wall,
}

impl BodyKind {
    pub fn solid(self) -> bool {
        match self {
            BodyKind::Player => true,
            BodyKind::Ball(kind) => kind.solid(),
            BodyKind::Wall => true,
        }
    }
}

/// Ball lifecycle. `Respawning` bodies are visually present but inert:
/// no integration and no pot checks until the animation finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallState {
    Active,
    Respawning { elapsed: f32 },
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: EntityId,
    pub kind: BodyKind,
    /// Top-left corner of the bounding box.
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// 0 means immovable: forces are discarded, not merely zero-effect.
    pub mass: f32,
    /// 0 means rectangular collision; > 0 means circular via center distance.
    pub radius: f32,
    /// Deceleration constant, px/s².
    pub friction: f32,
    pub color: Color,
    /// Face zones used by solid bodies to pick the contact normal.
    pub normals: Vec<NormalZone>,
    /// Where this body (re)spawns, as a top-left corner.
    pub spawn_pos: Vec2,
    pub state: BallState,
    /// Lazily deleted at the end of the frame, never mid-iteration.
    pub marked_for_removal: bool,
}

impl Body {
    /// A stationary obstacle with normal-zone strips along each face.
    pub fn wall(id: EntityId, min: Vec2, size: Vec2, color: Color) -> Self {
        let normals = vec![
            NormalZone {
                zone: Rect::new(min, Vec2::new(size.x, NORMAL_ZONE_DEPTH)),
                normal: Vec2::new(0.0, -1.0),
            },
            NormalZone {
                zone: Rect::new(min, Vec2::new(NORMAL_ZONE_DEPTH, size.y)),
                normal: Vec2::new(-1.0, 0.0),
            },
            NormalZone {
                zone: Rect::new(
                    Vec2::new(min.x + size.x - NORMAL_ZONE_DEPTH, min.y),
                    Vec2::new(NORMAL_ZONE_DEPTH, size.y),
                ),
                normal: Vec2::new(1.0, 0.0),
            },
            NormalZone {
                zone: Rect::new(
                    Vec2::new(min.x, min.y + size.y - NORMAL_ZONE_DEPTH),
                    Vec2::new(size.x, NORMAL_ZONE_DEPTH),
                ),
                normal: Vec2::new(0.0, 1.0),
            },
        ];
        Self {
            id,
            kind: BodyKind::Wall,
            pos: min,
            size,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            mass: 0.0,
            radius: 0.0,
            friction: 0.0,
            color,
            normals,
            spawn_pos: min,
            state: BallState::Active,
            marked_for_removal: false,
        }
    }

    /// A scoring ball centered on `center`.
    pub fn ball(id: EntityId, kind: BallKind, center: Vec2, color: Color) -> Self {
        let r = kind.radius();
        let pos = center - Vec2::splat(r);
        Self {
            id,
            kind: BodyKind::Ball(kind),
            pos,
            size: Vec2::splat(r * 2.0),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            mass: 1.0,
            radius: r,
            friction: FRICTION,
            color,
            normals: Vec::new(),
            spawn_pos: pos,
            state: BallState::Active,
            marked_for_removal: false,
        }
    }

    /// The cue ball centered on `center`.
    pub fn player(id: EntityId, center: Vec2, color: Color) -> Self {
        let pos = center - Vec2::splat(PLAYER_RADIUS);
        Self {
            id,
            kind: BodyKind::Player,
            pos,
            size: Vec2::splat(PLAYER_RADIUS * 2.0),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            mass: 1.0,
            radius: PLAYER_RADIUS,
            friction: FRICTION,
            color,
            normals: Vec::new(),
            spawn_pos: pos,
            state: BallState::Active,
            marked_for_removal: false,
        }
    }

    /// Start life in the respawn animation instead of fully active.
    pub fn respawning(mut self) -> Self {
        self.state = BallState::Respawning { elapsed: 0.0 };
        self
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn solid(&self) -> bool {
        self.kind.solid()
    }

    pub fn ball_kind(&self) -> Option<BallKind> {
        match self.kind {
            BodyKind::Ball(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether this body participates in the all-stopped check for ending
    /// a shot. Walls never move; respawning balls are inert.
    pub fn moving(&self) -> bool {
        self.kind != BodyKind::Wall && self.vel != Vec2::ZERO
    }

    /// Accumulate a force for this frame. Massless bodies discard it.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.mass > 0.0 {
            self.acc += force / self.mass;
        }
    }

    /// Friction force opposing the current velocity, magnitude scaled by
    /// mass so the resulting deceleration stays `friction` px/s².
    pub fn apply_friction(&mut self) {
        let force = set_magnitude(self.vel, -self.friction * self.mass);
        self.apply_force(force);
    }

    /// Fold accumulated forces into velocity, snap near-rest bodies to a
    /// dead stop, and reset the accumulator for the next frame.
    pub fn integrate_forces(&mut self, dt: f32) {
        self.vel += self.acc * dt;
        if self.vel.length_squared() <= STOP_THRESHOLD_SQ {
            self.vel = Vec2::ZERO;
        }
        self.acc = Vec2::ZERO;
    }

    /// Radius to draw this frame; respawning balls scale up from nothing
    /// with a slight overshoot.
    pub fn visual_radius(&self) -> f32 {
        match self.state {
            BallState::Active => self.radius,
            BallState::Respawning { elapsed } => {
                let t = (elapsed / RESPAWN_DURATION).clamp(0.0, 1.0);
                self.radius * Easing::BackOut.apply(t)
            }
        }
    }

    pub fn mark_for_removal(&mut self) {
        self.marked_for_removal = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_id() -> EntityId {
        EntityId(1)
    }

    const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    #[test]
    fn massless_bodies_discard_forces() {
        let mut wall = Body::wall(test_id(), Vec2::ZERO, Vec2::new(100.0, 20.0), WHITE);
        wall.apply_force(Vec2::new(5000.0, -3000.0));
        wall.integrate_forces(1.0 / 60.0);
        assert_eq!(wall.vel, Vec2::ZERO);
        assert_eq!(wall.acc, Vec2::ZERO);
    }

    #[test]
    fn ball_is_centered_on_spawn_point() {
        let ball = Body::ball(test_id(), BallKind::Red, Vec2::new(100.0, 50.0), WHITE);
        assert_eq!(ball.center(), Vec2::new(100.0, 50.0));
        assert_eq!(ball.radius, 15.0);
        assert_eq!(ball.size, Vec2::splat(30.0));
    }

    #[test]
    fn slow_bodies_snap_to_rest() {
        let mut ball = Body::ball(test_id(), BallKind::Blue, Vec2::ZERO, WHITE);
        // |v|^2 = 49 < 50: one integration with no new forces stops it dead.
        ball.vel = Vec2::new(7.0, 0.0);
        ball.integrate_forces(1.0 / 60.0);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn fast_bodies_keep_moving() {
        let mut ball = Body::ball(test_id(), BallKind::Blue, Vec2::ZERO, WHITE);
        ball.vel = Vec2::new(100.0, 0.0);
        ball.integrate_forces(1.0 / 60.0);
        assert_eq!(ball.vel, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn friction_opposes_velocity() {
        let mut ball = Body::ball(test_id(), BallKind::Red, Vec2::ZERO, WHITE);
        ball.vel = Vec2::new(600.0, 0.0);
        ball.apply_friction();
        ball.integrate_forces(1.0 / 60.0);
        let expected = 600.0 - FRICTION / 60.0;
        assert!((ball.vel.x - expected).abs() < 1e-3);
    }

    #[test]
    fn wall_normal_zones_cover_each_face() {
        let wall = Body::wall(test_id(), Vec2::new(10.0, 10.0), Vec2::new(200.0, 50.0), WHITE);
        assert_eq!(wall.normals.len(), 4);
        let up = wall
            .normals
            .iter()
            .find(|z| z.normal == Vec2::new(0.0, -1.0))
            .unwrap();
        assert_eq!(up.zone.min, Vec2::new(10.0, 10.0));
        assert_eq!(up.zone.size, Vec2::new(200.0, 5.0));
    }

    #[test]
    fn gold_is_not_solid() {
        assert!(!BallKind::Gold.solid());
        assert!(BallKind::Red.solid());
        let gold = Body::ball(test_id(), BallKind::Gold, Vec2::ZERO, WHITE);
        assert!(!gold.solid());
    }

    #[test]
    fn respawn_radius_grows_over_animation() {
        let mut ball = Body::ball(test_id(), BallKind::Blue, Vec2::ZERO, WHITE).respawning();
        assert!(ball.visual_radius() < 1.0);
        ball.state = BallState::Respawning {
            elapsed: RESPAWN_DURATION,
        };
        assert!((ball.visual_radius() - ball.radius).abs() < 1e-3);
    }
}
