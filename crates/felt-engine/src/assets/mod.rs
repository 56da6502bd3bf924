pub mod layout;

pub use layout::{BallSpawn, LayoutConfig};
