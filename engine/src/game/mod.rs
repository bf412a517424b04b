mod events;
mod flood_fill;
mod game_state;
mod grid;
mod history;
mod level;
mod scoring;
mod session;
mod session_rng;
mod settings;
mod types;

pub use events::{CompletionReport, MoveFeedback, NotificationSink, ProgressSink, ProgressTotals};
pub use flood_fill::{centroid, connected_region};
pub use game_state::{Completion, FloodGameState, MoveError, MoveOutcome};
pub use grid::Grid;
pub use history::GameHistoryEntry;
pub use level::{Level, StarThresholds, MAX_GRID_SIZE};
pub use scoring::{
    coverage_bonus, final_score, move_score, penalty_per_move, star_rating, star_threshold,
    ScoreResult,
};
pub use session::GameSession;
pub use session_rng::SessionRng;
pub use settings::SessionSettings;
pub use types::{FeedbackLevel, Fruit, GameStatus, GridPosition, Region, FRUIT_CATALOG_SIZE};
