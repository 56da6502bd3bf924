pub mod game;
pub mod layout;
pub mod palette;

pub use game::PocketPool;
