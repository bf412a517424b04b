use super::game_state::MoveOutcome;
use super::flood_fill::centroid;
use super::types::{FeedbackLevel, Fruit, GridPosition};
use crate::identifiers::LevelId;
use crate::progress::{Achievement, AchievementReport};

/// Per-move data for presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveFeedback {
    pub fruit: Fruit,
    pub cells_gained: usize,
    pub points_earned: u32,
    pub newly_gained_cells: Vec<GridPosition>,
    /// Where a score particle should appear, if anything was gained.
    pub particle_origin: Option<GridPosition>,
    pub feedback: FeedbackLevel,
    pub big_score: bool,
    pub move_count: u32,
    pub total_score: u32,
}

const BIG_SCORE_POINTS: u32 = 200;

impl MoveFeedback {
    pub(crate) fn from_outcome(outcome: &MoveOutcome, move_count: u32, total_score: u32) -> Self {
        Self {
            fruit: outcome.fruit,
            cells_gained: outcome.cells_gained,
            points_earned: outcome.points_earned,
            newly_gained_cells: outcome.gained_cells.clone(),
            particle_origin: centroid(&outcome.gained_cells),
            feedback: outcome.feedback,
            big_score: outcome.points_earned > BIG_SCORE_POINTS,
            move_count,
            total_score,
        }
    }
}

/// Emitted once per cleared level.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionReport {
    pub level_id: LevelId,
    pub score: u32,
    pub moves: u32,
    pub stars: u8,
    pub efficiency: f64,
    pub used_undo: bool,
    pub target_moves: u32,
}

/// Cumulative totals after a completion has been merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressTotals {
    pub levels_completed: u32,
    pub total_stars: u32,
    pub total_score: u64,
    pub perfect_levels: u32,
}

/// Receives game events. All methods default to doing nothing.
pub trait NotificationSink {
    fn on_move(&mut self, _feedback: &MoveFeedback) {}

    fn on_completion_changed(&mut self, _completed: bool) {}

    fn on_level_completed(&mut self, _report: &CompletionReport) {}

    fn on_achievements(&mut self, _report: &AchievementReport, _earned: &[Achievement]) {}

    fn on_life_lost(&mut self, _lives_remaining: u32) {}

    fn on_game_over(&mut self) {}

    /// Non-fatal problems such as a failed progress sync.
    fn on_warning(&mut self, _message: &str) {}
}

/// Merges completions into stored progress. Failures never undo the local move.
pub trait ProgressSink {
    fn record_completion(&mut self, report: &CompletionReport) -> Result<ProgressTotals, String>;
}

impl NotificationSink for () {}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn on_move(&mut self, feedback: &MoveFeedback) {
        (**self).on_move(feedback)
    }

    fn on_completion_changed(&mut self, completed: bool) {
        (**self).on_completion_changed(completed)
    }

    fn on_level_completed(&mut self, report: &CompletionReport) {
        (**self).on_level_completed(report)
    }

    fn on_achievements(&mut self, report: &AchievementReport, earned: &[Achievement]) {
        (**self).on_achievements(report, earned)
    }

    fn on_life_lost(&mut self, lives_remaining: u32) {
        (**self).on_life_lost(lives_remaining)
    }

    fn on_game_over(&mut self) {
        (**self).on_game_over()
    }

    fn on_warning(&mut self, message: &str) {
        (**self).on_warning(message)
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn record_completion(&mut self, report: &CompletionReport) -> Result<ProgressTotals, String> {
        (**self).record_completion(report)
    }
}
