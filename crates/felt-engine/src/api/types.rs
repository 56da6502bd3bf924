use bytemuck::{Pod, Zeroable};

/// Unique identifier for a body on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A named sound request emitted by the game logic.
/// The host maps the name to actual playback and no-ops if audio is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Two bodies collided.
    Hit,
    /// A ball was potted and scored.
    Score,
    /// The cue ball dropped into a hole.
    PlayerSink,
    /// The table was reset for a new game.
    Reset,
}

impl SoundEvent {
    /// Stable name used by the host's sound map.
    pub fn name(self) -> &'static str {
        match self {
            SoundEvent::Hit => "hit",
            SoundEvent::Score => "score",
            SoundEvent::PlayerSink => "player_sink",
            SoundEvent::Reset => "reset",
        }
    }
}

/// A game event forwarded to the host UI layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
