pub mod draw;

pub use draw::{Color, DrawBuffer, DrawCommand};
