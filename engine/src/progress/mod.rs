mod achievements;
mod player_progress;
mod store;

pub use achievements::{evaluate_achievements, Achievement, AchievementReport};
pub use player_progress::{LevelRecord, PlayerProgress};
pub use store::ProgressStore;
