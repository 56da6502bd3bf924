//! The table: body storage plus the shot/game state machine.
//!
//! All shared mutable state (body list, score, shot counters) lives here.
//! Bodies mutate only themselves; everything else goes through the table.
//! The update pass never adds or removes bodies mid-iteration: removals
//! are deferred through `marked_for_removal` and filtered after the pass,
//! additions go through a pending queue merged once the pass completes,
//! so queued bodies are first seen by the *next* frame's iteration.

use glam::Vec2;

use crate::api::game::EngineContext;
use crate::api::types::{EntityId, SoundEvent};
use crate::assets::layout::LayoutConfig;
use crate::components::body::{
    BallKind, BallState, Body, BodyKind, RESPAWN_DURATION,
};
use crate::core::collision::{
    circles_collide, contact_normal, impulse_magnitude, reaction_share,
};
use crate::core::math::set_magnitude;
use crate::input::snapshot::InputSnapshot;
use crate::renderer::draw::{Color, DrawBuffer};

/// Rail thickness around the board, px.
const WALL_THICKNESS: f32 = 25.0;

/// Rails are split around each hole, leaving a gap this many hole-radii
/// wide so balls can actually reach the hole centers.
const HOLE_GAP_SCALE: f32 = 2.2;

/// Strike speed per pixel of pointer distance from the cue ball.
const STRIKE_SCALE: f32 = 5.0;

/// Cap on the cue ball launch speed, px/s.
const MAX_STRIKE_SPEED: f32 = 2000.0;

/// Shot lifecycle. `Settling` refuses new input while balls roll out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotState {
    Idle,
    ShotInProgress,
    Settling,
    GameOver,
}

/// Colors for everything the table itself draws.
#[derive(Debug, Clone, Copy)]
pub struct TableColors {
    pub player: Color,
    pub wall: Color,
    pub hole: Color,
    pub red: Color,
    pub blue: Color,
    pub black: Color,
    pub gold: Color,
}

impl TableColors {
    pub fn ball(&self, kind: BallKind) -> Color {
        match kind {
            BallKind::Red => self.red,
            BallKind::Blue => self.blue,
            BallKind::Black => self.black,
            BallKind::Gold => self.gold,
        }
    }
}

impl Default for TableColors {
    fn default() -> Self {
        Self {
            player: Color::rgb8(240, 255, 240),
            wall: Color::rgb8(20, 40, 20),
            hole: Color::rgb8(20, 40, 20),
            red: Color::rgb8(220, 50, 50),
            blue: Color::rgb8(40, 20, 200),
            black: Color::rgb8(20, 40, 20),
            gold: Color::rgb8(220, 220, 50),
        }
    }
}

/// A ball scheduled to come back once the current shot ends.
#[derive(Debug, Clone, Copy)]
struct RespawnEntry {
    kind: BallKind,
    center: Vec2,
}

pub struct Table {
    width: f32,
    height: f32,
    layout: LayoutConfig,
    colors: TableColors,
    bodies: Vec<Body>,
    /// Bodies queued mid-frame, merged after the update pass completes.
    pending: Vec<Body>,
    holes: Vec<Vec2>,
    hole_radius: f32,
    score: u32,
    shots_remaining: u32,
    shot: ShotState,
    respawn_queue: Vec<RespawnEntry>,
    /// Whether the cue ball touched anything this shot.
    cue_contact: bool,
    pointer_was_pressed: bool,
    key_was_pressed: bool,
    playing: bool,
}

impl Table {
    pub fn new(layout: LayoutConfig, colors: TableColors, ctx: &mut EngineContext) -> Self {
        let mut table = Self {
            width: layout.width(),
            height: layout.height(),
            holes: layout.hole_positions(),
            hole_radius: layout.hole_radius,
            score: 0,
            shots_remaining: layout.shots,
            shot: ShotState::Idle,
            bodies: Vec::with_capacity(32),
            pending: Vec::new(),
            respawn_queue: Vec::new(),
            cue_contact: false,
            pointer_was_pressed: false,
            key_was_pressed: false,
            playing: true,
            colors,
            layout,
        };
        table.spawn_all(ctx);
        table
    }

    // -- Accessors --

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn shots_remaining(&self) -> u32 {
        self.shots_remaining
    }

    pub fn shot_state(&self) -> ShotState {
        self.shot
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn cue_contact(&self) -> bool {
        self.cue_contact
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn holes(&self) -> &[Vec2] {
        &self.holes
    }

    pub fn hole_radius(&self) -> f32 {
        self.hole_radius
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut Vec<Body> {
        &mut self.bodies
    }

    pub fn player(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.kind == BodyKind::Player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.kind == BodyKind::Player)
    }

    /// Live balls of a kind, respawning ones included.
    pub fn count_balls(&self, kind: BallKind) -> usize {
        self.bodies
            .iter()
            .filter(|b| !b.marked_for_removal && b.ball_kind() == Some(kind))
            .count()
    }

    // -- Setup --

    fn spawn_all(&mut self, ctx: &mut EngineContext) {
        self.spawn_walls(ctx);

        let player_center = self.layout.resolve(self.layout.player);
        self.bodies
            .push(Body::player(ctx.next_id(), player_center, self.colors.player));

        let spawns: Vec<_> = self.layout.balls.clone();
        for spawn in spawns {
            let center = self.layout.resolve(spawn.pos);
            self.bodies.push(Body::ball(
                ctx.next_id(),
                spawn.kind,
                center,
                self.colors.ball(spawn.kind),
            ));
        }
    }

    /// Border rails, split around the holes on each edge so balls can
    /// reach the hole centers.
    fn spawn_walls(&mut self, ctx: &mut EngineContext) {
        let (w, h, t) = (self.width, self.height, WALL_THICKNESS);
        let r = self.hole_radius;
        let gap = r * HOLE_GAP_SCALE;

        let top: Vec<f32> = self.holes.iter().filter(|p| p.y <= r).map(|p| p.x).collect();
        let bottom: Vec<f32> = self.holes.iter().filter(|p| p.y >= h - r).map(|p| p.x).collect();
        let left: Vec<f32> = self.holes.iter().filter(|p| p.x <= r).map(|p| p.y).collect();
        let right: Vec<f32> = self.holes.iter().filter(|p| p.x >= w - r).map(|p| p.y).collect();

        for (start, len) in edge_segments(w, top, gap) {
            let id = ctx.next_id();
            self.bodies.push(Body::wall(
                id,
                Vec2::new(start, 0.0),
                Vec2::new(len, t),
                self.colors.wall,
            ));
        }
        for (start, len) in edge_segments(w, bottom, gap) {
            let id = ctx.next_id();
            self.bodies.push(Body::wall(
                id,
                Vec2::new(start, h - t),
                Vec2::new(len, t),
                self.colors.wall,
            ));
        }
        for (start, len) in edge_segments(h, left, gap) {
            let id = ctx.next_id();
            self.bodies.push(Body::wall(
                id,
                Vec2::new(0.0, start),
                Vec2::new(t, len),
                self.colors.wall,
            ));
        }
        for (start, len) in edge_segments(h, right, gap) {
            let id = ctx.next_id();
            self.bodies.push(Body::wall(
                id,
                Vec2::new(w - t, start),
                Vec2::new(t, len),
                self.colors.wall,
            ));
        }
    }

    /// Tear everything down and lay out a fresh game.
    pub fn reset(&mut self, ctx: &mut EngineContext) {
        self.bodies.clear();
        self.pending.clear();
        self.respawn_queue.clear();
        self.score = 0;
        self.shots_remaining = self.layout.shots;
        self.shot = ShotState::Idle;
        self.cue_contact = false;
        ctx.effects.clear();
        self.spawn_all(ctx);
        ctx.emit_sound(SoundEvent::Reset);
        log::info!("table reset: {} shots", self.shots_remaining);
    }

    // -- Frame update --

    /// One simulation step. A `dt` of exactly 0 skips everything.
    pub fn update(&mut self, ctx: &mut EngineContext, input: &InputSnapshot, dt: f32) {
        if dt == 0.0 {
            return;
        }
        if input.quit {
            self.playing = false;
            return;
        }

        let pointer_edge = input.pointer_pressed && !self.pointer_was_pressed;
        let key_edge = input.key_pressed && !self.key_was_pressed;
        self.pointer_was_pressed = input.pointer_pressed;
        self.key_was_pressed = input.key_pressed;

        if self.shot == ShotState::GameOver {
            if pointer_edge || key_edge {
                self.reset(ctx);
            }
            return;
        }

        if self.shot == ShotState::Idle && pointer_edge {
            self.strike(input.pointer);
        }
        if self.shot == ShotState::ShotInProgress && !input.pointer_pressed {
            self.shot = ShotState::Settling;
        }

        // Physics pass. Pairs resolved once per frame, first detection wins.
        let mut resolved_pairs: Vec<(u32, u32)> = Vec::new();
        for i in 0..self.bodies.len() {
            self.step_body(i, dt, ctx, &mut resolved_pairs);
        }

        self.check_holes(ctx);

        let shot_active = matches!(self.shot, ShotState::ShotInProgress | ShotState::Settling);
        if shot_active && !input.pointer_pressed && self.all_stopped() {
            self.finish_shot(ctx);
        }

        // Commit: removals first, then the bodies queued mid-frame.
        self.bodies.retain(|b| !b.marked_for_removal);
        self.bodies.append(&mut self.pending);
    }

    /// Launch the cue ball toward the pointer and open the shot.
    fn strike(&mut self, pointer: Vec2) {
        let Some(player) = self.player_mut() else {
            return;
        };
        let dir = pointer - player.center();
        let speed = (dir.length() * STRIKE_SCALE).min(MAX_STRIKE_SPEED);
        player.vel = set_magnitude(dir, speed);
        self.cue_contact = false;
        self.shot = ShotState::ShotInProgress;
        log::info!("shot started, launch speed {:.0} px/s", speed);
    }

    /// Integration and collision response for one body.
    fn step_body(
        &mut self,
        i: usize,
        dt: f32,
        ctx: &mut EngineContext,
        resolved_pairs: &mut Vec<(u32, u32)>,
    ) {
        if self.bodies[i].kind == BodyKind::Wall || self.bodies[i].marked_for_removal {
            return;
        }

        // Respawning balls only run their scale-up clock.
        if let BallState::Respawning { elapsed } = self.bodies[i].state {
            let elapsed = elapsed + dt;
            self.bodies[i].vel = Vec2::ZERO;
            self.bodies[i].acc = Vec2::ZERO;
            self.bodies[i].state = if elapsed >= RESPAWN_DURATION {
                BallState::Active
            } else {
                BallState::Respawning { elapsed }
            };
            return;
        }

        self.bodies[i].apply_friction();

        let old_pos = self.bodies[i].pos;
        let step = self.bodies[i].vel * dt;
        self.bodies[i].pos = old_pos + step;

        // Scan every other solid body. The contact normal of the last
        // overlapping body wins, as each collision overwrites the previous.
        let mut contact: Option<(usize, Vec2)> = None;
        for j in 0..self.bodies.len() {
            if j == i || self.bodies[j].marked_for_removal || !self.bodies[j].solid() {
                continue;
            }
            let (a_center, a_radius, a_rect) = {
                let a = &self.bodies[i];
                (a.center(), a.radius, a.rect())
            };
            let (b_center, b_radius, b_rect) = {
                let b = &self.bodies[j];
                (b.center(), b.radius, b.rect())
            };
            let both_circles = a_radius > 0.0 && b_radius > 0.0;
            let hit = if both_circles {
                circles_collide(a_center, a_radius, b_center, b_radius)
            } else {
                a_rect.intersects(&b_rect)
            };
            if !hit {
                continue;
            }

            let key = pair_key(self.bodies[i].id, self.bodies[j].id);
            if resolved_pairs.contains(&key) {
                continue;
            }
            resolved_pairs.push(key);

            self.on_contact(i, j, ctx);

            let normal = if both_circles {
                (a_center - b_center).normalize_or_zero()
            } else {
                match a_rect.clip(&b_rect) {
                    Some(clip) => {
                        contact_normal(&clip, &self.bodies[j].normals, a_center, b_center)
                    }
                    None => (a_center - b_center).normalize_or_zero(),
                }
            };
            contact = Some((j, normal));
        }

        if let Some((j, normal)) = contact {
            // No penetration resolution beyond a full rollback.
            self.bodies[i].pos = old_pos;

            let m_i = self.bodies[i].mass;
            let m_j = self.bodies[j].mass;
            match reaction_share(m_i, m_j) {
                None => log::warn!("skipping collision between two immovable bodies"),
                Some(share_i) => {
                    let relative = self.bodies[i].vel - self.bodies[j].vel;
                    let magnitude = impulse_magnitude(normal, relative, dt);
                    let share_j = 1.0 - share_i;
                    // Forces are scaled by the recipient's mass so the
                    // split comes out in velocity space, same convention
                    // as the mass-scaled friction force.
                    let force_i = normal * (magnitude * m_i * share_i);
                    let force_j = -normal * (magnitude * m_j * share_j);
                    self.bodies[i].apply_force(force_i);
                    self.bodies[j].apply_force(force_j);
                }
            }
        }

        self.bodies[i].integrate_forces(dt);
    }

    /// Collision side effects, fired once per colliding pair per frame.
    fn on_contact(&mut self, i: usize, j: usize, ctx: &mut EngineContext) {
        ctx.emit_sound(SoundEvent::Hit);
        let pair = (self.bodies[i].kind, self.bodies[j].kind);
        if matches!(pair, (BodyKind::Player, BodyKind::Ball(_)))
            || matches!(pair, (BodyKind::Ball(_), BodyKind::Player))
        {
            self.cue_contact = true;
        }
    }

    /// Pot detection, plus the out-of-bounds guard for balls that slip
    /// through a rail gap without crossing a hole center.
    fn check_holes(&mut self, ctx: &mut EngineContext) {
        let mut potted: Vec<usize> = Vec::new();
        for (i, body) in self.bodies.iter().enumerate() {
            if body.kind == BodyKind::Wall
                || body.marked_for_removal
                || matches!(body.state, BallState::Respawning { .. })
            {
                continue;
            }
            let center = body.center();
            let in_hole = self.holes.iter().any(|hole| {
                let reach = body.radius + self.hole_radius;
                center.distance_squared(*hole) <= reach * reach
            });
            let escaped = center.x < 0.0
                || center.x > self.width
                || center.y < 0.0
                || center.y > self.height;
            if escaped && !in_hole {
                log::warn!("body {:?} escaped the board at {:?}", body.id, center);
            }
            if in_hole || escaped {
                potted.push(i);
            }
        }
        for i in potted {
            self.resolve_pot(i, ctx);
        }
    }

    fn resolve_pot(&mut self, i: usize, ctx: &mut EngineContext) {
        match self.bodies[i].kind {
            BodyKind::Wall => {}
            BodyKind::Player => {
                // The cue ball never scores a hole: it resets on the spot
                // and the shot keeps going until everything settles.
                log::info!("cue ball sank, resetting to start");
                let spawn = self.bodies[i].spawn_pos;
                let body = &mut self.bodies[i];
                body.pos = spawn;
                body.vel = Vec2::ZERO;
                body.acc = Vec2::ZERO;
                ctx.emit_sound(SoundEvent::PlayerSink);
            }
            BodyKind::Ball(kind) => {
                self.bodies[i].mark_for_removal();
                let center = self.bodies[i].center();
                let color = self.bodies[i].color;
                let spawn_center = self.bodies[i].spawn_pos + self.bodies[i].size * 0.5;

                if kind.clears_as_group() && self.count_balls(kind) == 0 {
                    // Last one of the set: the clear bonus replaces the
                    // per-ball score and the whole set comes back.
                    self.add_score(BallKind::CLEAR_BONUS);
                    ctx.effects.spawn_popup(
                        format!("CLEAR! +{}", BallKind::CLEAR_BONUS),
                        color,
                        center,
                        self.bounds(),
                    );
                    let group: Vec<RespawnEntry> = self
                        .layout
                        .balls
                        .iter()
                        .filter(|s| s.kind == kind)
                        .map(|s| RespawnEntry {
                            kind,
                            center: self.layout.resolve(s.pos),
                        })
                        .collect();
                    self.respawn_queue.extend(group);
                    log::info!("{} set cleared, +{}", kind.label(), BallKind::CLEAR_BONUS);
                } else {
                    let delta = kind.score_delta();
                    self.add_score(delta);
                    let text = if delta >= 0 {
                        format!("+{}", delta)
                    } else {
                        format!("{}", delta)
                    };
                    ctx.effects.spawn_popup(text, color, center, self.bounds());
                    if kind.respawns_each_shot() {
                        self.respawn_queue.push(RespawnEntry {
                            kind,
                            center: spawn_center,
                        });
                    }
                    log::info!("{} ball potted, score now {}", kind.label(), self.score);
                }
                ctx.emit_sound(SoundEvent::Score);
            }
        }
    }

    /// Apply a score change, floored at zero.
    fn add_score(&mut self, delta: i32) {
        if delta >= 0 {
            self.score += delta as u32;
        } else {
            self.score = self.score.saturating_sub(delta.unsigned_abs());
        }
    }

    fn all_stopped(&self) -> bool {
        self.bodies.iter().all(|b| !b.moving())
    }

    /// Close out the shot: burn one shot, bring back the potted
    /// respawners (they join the body list on the next frame), and either
    /// return to idle or end the game.
    fn finish_shot(&mut self, ctx: &mut EngineContext) {
        self.shots_remaining = self.shots_remaining.saturating_sub(1);
        for entry in std::mem::take(&mut self.respawn_queue) {
            let color = self.colors.ball(entry.kind);
            let body =
                Body::ball(ctx.next_id(), entry.kind, entry.center, color).respawning();
            self.pending.push(body);
        }
        if self.shots_remaining == 0 {
            self.shot = ShotState::GameOver;
            log::info!("out of shots, final score {}", self.score);
        } else {
            self.shot = ShotState::Idle;
            log::info!(
                "shot finished, {} remaining, score {}",
                self.shots_remaining,
                self.score
            );
        }
    }

    // -- Draw --

    /// Emit draw requests for the holes and every body. Holes go first so
    /// balls rolling over them stay visible.
    pub fn draw(&self, out: &mut DrawBuffer) {
        for hole in &self.holes {
            out.fill_circle(*hole, self.hole_radius, self.colors.hole);
        }
        for body in &self.bodies {
            match body.kind {
                BodyKind::Wall => out.fill_rect(body.pos, body.size, body.color),
                _ => out.fill_circle(body.center(), body.visual_radius(), body.color),
            }
        }
    }
}

/// Split an edge of `length` into rail segments, leaving a `gap`-wide
/// opening centered on each hole position along that edge.
fn edge_segments(length: f32, mut gap_centers: Vec<f32>, gap: f32) -> Vec<(f32, f32)> {
    gap_centers.sort_by(f32::total_cmp);
    let mut segments = Vec::new();
    let mut cursor = 0.0;
    for center in gap_centers {
        let end = (center - gap * 0.5).min(length);
        if end > cursor {
            segments.push((cursor, end - cursor));
        }
        cursor = cursor.max(center + gap * 0.5);
    }
    if cursor < length {
        segments.push((cursor, length - cursor));
    }
    segments
}

fn pair_key(a: EntityId, b: EntityId) -> (u32, u32) {
    if a.0 <= b.0 {
        (a.0, b.0)
    } else {
        (b.0, a.0)
    }
}
