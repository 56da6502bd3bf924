//! Polled input state.
//!
//! The core consumes one snapshot per frame, not a raw event stream. The
//! host samples its windowing layer however it likes and hands over the
//! result; edge detection (press vs. hold) happens inside the table.

use glam::Vec2;

/// Per-frame input snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Primary pointer (mouse button / touch) currently down.
    pub pointer_pressed: bool,
    /// Pointer position in world coordinates.
    pub pointer: Vec2,
    /// Any keyboard key currently down (used to leave the game-over screen).
    pub key_pressed: bool,
    /// Host asked to quit (window close, quit key).
    pub quit: bool,
}

impl InputSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_pointer(pos: Vec2, pressed: bool) -> Self {
        Self {
            pointer_pressed: pressed,
            pointer: pos,
            ..Self::default()
        }
    }
}
