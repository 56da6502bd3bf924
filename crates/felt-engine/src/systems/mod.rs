pub mod effects;

pub use effects::{EffectsState, Rng, TextPopup};
