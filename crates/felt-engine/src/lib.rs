pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent, SoundEvent};
pub use assets::layout::{BallSpawn, LayoutConfig};
pub use components::body::{BallKind, BallState, Body, BodyKind};
pub use core::collision::{NormalZone, Rect, ELASTICITY};
pub use core::table::{ShotState, Table, TableColors};
pub use core::time::FixedTimestep;
pub use input::snapshot::InputSnapshot;
pub use renderer::draw::{Color, DrawBuffer, DrawCommand};
pub use systems::effects::{EffectsState, Rng, TextPopup};
pub use extensions::{ease, lerp, Easing};
