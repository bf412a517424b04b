use super::events::{CompletionReport, MoveFeedback, NotificationSink, ProgressSink};
use super::game_state::{Completion, FloodGameState, MoveError, MoveOutcome};
use super::level::Level;
use super::session_rng::SessionRng;
use super::settings::SessionSettings;
use super::types::Fruit;
use crate::config::Validate;
use crate::log;
use crate::progress::{evaluate_achievements, AchievementReport};

/// One attempt at one level: runs the state machine and tells collaborators what happened.
///
/// Collaborator calls happen after the local state has changed and cannot roll it back.
pub struct GameSession<N, P>
where
    N: NotificationSink,
    P: ProgressSink,
{
    state: FloodGameState,
    seed: u64,
    notifier: N,
    progress: P,
}

impl<N, P> GameSession<N, P>
where
    N: NotificationSink,
    P: ProgressSink,
{
    pub fn create(
        level: Level,
        settings: &SessionSettings,
        seed: u64,
        notifier: N,
        progress: P,
    ) -> Result<Self, String> {
        level.validate()?;
        settings.validate()?;

        let mut rng = SessionRng::new(seed);
        let grid = level.initial_grid(&mut rng);

        log!(
            "Starting {} ({}x{}, {} fruits, par {}, seed {})",
            level.display_name(),
            level.grid_size,
            level.grid_size,
            level.fruit_count,
            level.target_moves,
            seed
        );

        Ok(Self {
            state: FloodGameState::new(level, grid, settings.max_lives),
            seed,
            notifier,
            progress,
        })
    }

    pub fn apply_move(&mut self, fruit: Fruit) -> Result<MoveOutcome, MoveError> {
        let was_completed = self.state.is_completed();
        let outcome = self.state.apply_move(fruit)?;

        let feedback = MoveFeedback::from_outcome(
            &outcome,
            self.state.move_count(),
            self.state.total_score(),
        );
        self.notifier.on_move(&feedback);

        match outcome.completion {
            Some(Completion::Cleared(result)) => {
                let report = CompletionReport {
                    level_id: self.state.level().id,
                    score: result.score,
                    moves: self.state.move_count(),
                    stars: result.stars,
                    efficiency: result.efficiency,
                    used_undo: self.state.used_undo(),
                    target_moves: self.state.level().target_moves,
                };
                log!(
                    "Level {} cleared: score {}, {} stars, {} moves",
                    report.level_id,
                    report.score,
                    report.stars,
                    report.moves
                );
                self.notifier.on_level_completed(&report);
                self.sync_progress(&report);
            }
            Some(Completion::LifeLost {
                filled_with,
                lives_remaining,
            }) => {
                log!(
                    "Level {} covered with {} instead of the target, {} lives left",
                    self.state.level().id,
                    filled_with,
                    lives_remaining
                );
                self.notifier.on_life_lost(lives_remaining);
            }
            Some(Completion::GameOver { filled_with }) => {
                log!(
                    "Level {} covered with {} and no lives left: game over",
                    self.state.level().id,
                    filled_with
                );
                self.notifier.on_game_over();
            }
            None => {}
        }

        self.notify_completion_change(was_completed);
        Ok(outcome)
    }

    fn sync_progress(&mut self, report: &CompletionReport) {
        match self.progress.record_completion(report) {
            Ok(totals) => {
                let achievement_report = AchievementReport::new(report, &totals);
                let earned = evaluate_achievements(&achievement_report);
                self.notifier.on_achievements(&achievement_report, &earned);
            }
            Err(e) => {
                log!("Progress sync failed for level {}: {}", report.level_id, e);
                self.notifier
                    .on_warning(&format!("Progress could not be saved: {}", e));
            }
        }
    }

    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let was_completed = self.state.is_completed();
        if !self.state.undo() {
            return false;
        }
        self.notify_completion_change(was_completed);
        true
    }

    pub fn reset(&mut self) {
        let was_completed = self.state.is_completed();
        self.state.reset();
        self.notify_completion_change(was_completed);
    }

    pub fn check_completion(&self) -> bool {
        self.state.check_completion()
    }

    fn notify_completion_change(&mut self, was_completed: bool) {
        let completed = self.state.is_completed();
        if completed != was_completed {
            self.notifier.on_completion_changed(completed);
        }
    }

    pub fn state(&self) -> &FloodGameState {
        &self.state
    }

    pub fn level(&self) -> &Level {
        self.state.level()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn into_parts(self) -> (FloodGameState, N, P) {
        (self.state, self.notifier, self.progress)
    }
}
