pub mod config;
pub mod game;
pub mod identifiers;
pub mod levels;
pub mod logger;
pub mod progress;

pub use identifiers::LevelId;
