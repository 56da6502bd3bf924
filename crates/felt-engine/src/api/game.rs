use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::input::snapshot::InputSnapshot;
use crate::renderer::draw::DrawBuffer;
use crate::systems::effects::EffectsState;

/// Configuration for the host loop, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
///
/// The host drives it: one `update` per fixed step with a fresh input
/// snapshot, then one `render` per displayed frame, then it drains the
/// sound/event buffers and calls `clear_frame_data`.
pub trait Game {
    /// Return configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Set up initial state, spawn bodies.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputSnapshot);

    /// Fill the draw buffer for this frame.
    fn render(&self, _ctx: &EngineContext, _out: &mut DrawBuffer) {}
}

/// Mutable engine state shared with the game each tick: visual effects,
/// the per-frame sound/event buffers, and the entity id allocator.
pub struct EngineContext {
    pub effects: EffectsState,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            effects: EffectsState::new(42),
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound request to be forwarded to the host's audio layer.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host UI.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn clear_frame_data_drops_buffers() {
        let mut ctx = EngineContext::new();
        ctx.emit_sound(SoundEvent::Hit);
        ctx.emit_event(GameEvent {
            kind: 1.0,
            a: 2.0,
            b: 0.0,
            c: 0.0,
        });
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }
}
