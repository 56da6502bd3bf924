//! Ephemeral visual effects: text popups for scoring events.
//!
//! Popups live outside the body list: they never collide, never score,
//! and expire on their own clock. Removal is lazy: expired popups are
//! filtered out at the end of the effects update pass.

use glam::Vec2;

use crate::renderer::draw::{Color, DrawBuffer, DrawCommand};

/// Base popup lifetime in seconds; each popup jitters this to 0.5–1.5×.
const POPUP_LIFETIME: f32 = 0.4;

/// Popups spawned closer than this to a board edge get nudged inside.
const EDGE_PADDING: f32 = 30.0;

/// Rough extent of rendered popup text; positions are top-left anchored,
/// so the right/bottom edges need this much extra room.
const TEXT_EXTENT: f32 = 50.0;

/// Base glyph height for popup text.
const POPUP_TEXT_SIZE: f32 = 28.0;

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no external RNG crate.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Generate a random float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.next_int(1_000_000) as f32 / 1_000_000.0
    }
}

/// A transient text popup (e.g. "+100" when a ball drops).
#[derive(Debug, Clone)]
pub struct TextPopup {
    pub text: String,
    pub color: Color,
    /// Top-left anchor of the text.
    pub pos: Vec2,
    /// Rotation in radians, fixed at spawn.
    pub rotation: f32,
    /// Base scale, fixed at spawn; the draw pass animates on top of it.
    pub scale: f32,
    /// Remaining lifetime in seconds.
    pub lifetime: f32,
    /// Initial lifetime in seconds.
    pub total_lifetime: f32,
}

impl TextPopup {
    /// Advance the popup clock. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        self.lifetime > 0.0
    }

    /// Current draw parameters: scale up during the first half of life,
    /// fade out during the second.
    fn animation(&self) -> (f32, f32) {
        let t = self.lifetime / self.total_lifetime;
        if t > 0.5 {
            ((1.0 - t) * 2.0, 1.0)
        } else {
            (1.0, 1.0 - (t - 0.5).abs() * 2.0)
        }
    }
}

/// Owner of all live popups plus the RNG that styles them.
#[derive(Debug)]
pub struct EffectsState {
    popups: Vec<TextPopup>,
    rng: Rng,
}

impl EffectsState {
    pub fn new(seed: u64) -> Self {
        Self {
            popups: Vec::with_capacity(16),
            rng: Rng::new(seed),
        }
    }

    /// Spawn a popup near `pos`, nudged inside `bounds` when too close to
    /// an edge, with randomized tilt, scale and lifetime.
    pub fn spawn_popup(&mut self, text: impl Into<String>, color: Color, pos: Vec2, bounds: Vec2) {
        let mut pos = pos;
        if pos.x < EDGE_PADDING {
            pos.x = EDGE_PADDING + self.rng.next_f32() * EDGE_PADDING;
        } else if pos.x > bounds.x - EDGE_PADDING - TEXT_EXTENT {
            pos.x = bounds.x - EDGE_PADDING - TEXT_EXTENT - self.rng.next_f32() * EDGE_PADDING;
        }
        if pos.y < EDGE_PADDING {
            pos.y = EDGE_PADDING + self.rng.next_f32() * EDGE_PADDING;
        } else if pos.y > bounds.y - EDGE_PADDING - TEXT_EXTENT {
            pos.y = bounds.y - EDGE_PADDING - TEXT_EXTENT - self.rng.next_f32() * EDGE_PADDING;
        }

        let rotation = (self.rng.next_f32() * 180.0 - 90.0).to_radians();
        let scale = 1.0 + self.rng.next_f32() * 1.5;
        let lifetime = POPUP_LIFETIME * (0.5 + self.rng.next_f32());

        self.popups.push(TextPopup {
            text: text.into(),
            color,
            pos,
            rotation,
            scale,
            lifetime,
            total_lifetime: lifetime,
        });
    }

    /// Tick all popups and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        self.popups.retain_mut(|p| p.tick(dt));
    }

    /// Emit draw requests for every live popup.
    pub fn draw(&self, out: &mut DrawBuffer) {
        for p in &self.popups {
            let (grow, alpha) = p.animation();
            out.push(DrawCommand::Text {
                text: p.text.clone(),
                pos: p.pos,
                size: POPUP_TEXT_SIZE,
                color: p.color.with_alpha(p.color.a * alpha),
                rotation: p.rotation,
                scale: p.scale * grow,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    pub fn clear(&mut self) {
        self.popups.clear();
    }
}
