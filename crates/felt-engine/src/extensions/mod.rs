// extensions/mod.rs
//
// Optional extras decoupled from Body/Table. Games opt in by using them.

pub mod easing;

pub use easing::{ease, lerp, Easing};
