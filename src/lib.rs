pub mod ai;
pub mod config;
pub mod data;
pub mod ecs;
pub mod error;
pub mod input;
pub mod log;
pub mod map;
pub mod progression;
pub mod render;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use config::GameConfig;
pub use error::GameError;
pub use map::Direction;
pub use session::{Command, Session};
pub use snapshot::WorldSnapshot;
