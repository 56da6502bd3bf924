pub mod snapshot;

pub use snapshot::InputSnapshot;
