use std::fmt;

use super::flood_fill::connected_region;
use super::grid::Grid;
use super::history::GameHistoryEntry;
use super::level::Level;
use super::scoring::{final_score, move_score, ScoreResult};
use super::types::{FeedbackLevel, Fruit, GameStatus, GridPosition, Region};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    NotInProgress(GameStatus),
    FruitNotAvailable { fruit: Fruit, fruit_count: usize },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NotInProgress(status) => write!(f, "Game is not in progress ({:?})", status),
            MoveError::FruitNotAvailable { fruit, fruit_count } => write!(
                f,
                "{} is not playable on a level with {} fruits",
                fruit, fruit_count
            ),
        }
    }
}

impl std::error::Error for MoveError {}

/// What happened when a move covered the whole grid.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Completion {
    Cleared(ScoreResult),
    /// Covered with the wrong fruit; the board was restored and a life spent.
    LifeLost { filled_with: Fruit, lives_remaining: u32 },
    /// Covered with the wrong fruit and no lives remain.
    GameOver { filled_with: Fruit },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    pub fruit: Fruit,
    pub cells_gained: usize,
    pub points_earned: u32,
    /// Newly owned positions, for particle placement.
    pub gained_cells: Vec<GridPosition>,
    pub feedback: FeedbackLevel,
    pub completion: Option<Completion>,
}

#[derive(Clone, Debug)]
pub struct FloodGameState {
    level: Level,
    initial_grid: Grid,
    grid: Grid,
    region: Region,
    move_count: u32,
    total_score: u32,
    status: GameStatus,
    history: Vec<GameHistoryEntry>,
    cells_gained_per_move: Vec<usize>,
    used_undo: bool,
    lives: Option<u32>,
    max_lives: u32,
}

impl FloodGameState {
    /// `lives` only apply when the level names a target fruit.
    ///
    /// # Panics
    ///
    /// Panics if the grid size differs from the level's or the start position is outside it.
    pub fn new(level: Level, grid: Grid, max_lives: u32) -> Self {
        assert_eq!(
            grid.size(),
            level.grid_size,
            "grid does not match level {} size",
            level.id
        );
        assert!(
            grid.contains(level.start_position),
            "start position {} outside level {} grid",
            level.start_position,
            level.id
        );

        let lives = level.target_fruit.map(|_| max_lives);
        let region = Region::from([level.start_position]);
        Self {
            level,
            initial_grid: grid.clone(),
            grid,
            region,
            move_count: 0,
            total_score: 0,
            status: GameStatus::InProgress,
            history: Vec::new(),
            cells_gained_per_move: Vec::new(),
            used_undo: false,
            lives,
            max_lives,
        }
    }

    pub fn apply_move(&mut self, fruit: Fruit) -> Result<MoveOutcome, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::NotInProgress(self.status));
        }
        if !fruit.is_available(self.level.fruit_count) {
            return Err(MoveError::FruitNotAvailable {
                fruit,
                fruit_count: self.level.fruit_count,
            });
        }

        self.history.push(self.snapshot());

        let old_region = std::mem::take(&mut self.region);
        self.grid.paint(&old_region, fruit);
        self.region = connected_region(&self.grid, self.level.start_position, fruit);

        let gained_cells: Vec<GridPosition> =
            self.region.difference(&old_region).copied().collect();
        let cells_gained = gained_cells.len();
        let points_earned = move_score(cells_gained, self.level.grid_size);

        self.cells_gained_per_move.push(cells_gained);
        self.total_score = self.total_score.saturating_add(points_earned);
        self.move_count += 1;

        let completion = if self.check_completion() {
            Some(self.complete(fruit))
        } else {
            None
        };

        Ok(MoveOutcome {
            fruit,
            cells_gained,
            points_earned,
            gained_cells,
            feedback: FeedbackLevel::for_move(cells_gained, self.level.grid_size),
            completion,
        })
    }

    fn complete(&mut self, filled_with: Fruit) -> Completion {
        match self.level.target_fruit {
            Some(target) if target != filled_with => {
                let lives_remaining = self.lives.unwrap_or(0).saturating_sub(1);
                self.lives = Some(lives_remaining);
                if lives_remaining > 0 {
                    self.restore_initial_board();
                    Completion::LifeLost {
                        filled_with,
                        lives_remaining,
                    }
                } else {
                    self.status = GameStatus::GameOver;
                    self.history.clear();
                    Completion::GameOver { filled_with }
                }
            }
            _ => {
                let result = final_score(&self.level, self.move_count, &self.cells_gained_per_move);
                self.status = GameStatus::Completed;
                self.total_score = result.score;
                Completion::Cleared(result)
            }
        }
    }

    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };

        self.grid = previous.grid;
        self.region = previous.region;
        self.move_count = previous.move_count;
        self.total_score = previous.total_score;
        self.cells_gained_per_move.truncate(previous.move_count as usize);
        self.status = GameStatus::InProgress;
        self.used_undo = true;
        true
    }

    /// Restarts the attempt on the same initial grid. Lives are kept unless exhausted.
    pub fn reset(&mut self) {
        self.restore_initial_board();
        self.used_undo = false;
        if self.status == GameStatus::GameOver || self.lives == Some(0) {
            self.lives = self.level.target_fruit.map(|_| self.max_lives);
        }
        self.status = GameStatus::InProgress;
    }

    fn restore_initial_board(&mut self) {
        self.grid = self.initial_grid.clone();
        self.region = Region::from([self.level.start_position]);
        self.move_count = 0;
        self.total_score = 0;
        self.history.clear();
        self.cells_gained_per_move.clear();
    }

    pub fn check_completion(&self) -> bool {
        self.region.len() == self.level.total_cells()
    }

    pub fn snapshot(&self) -> GameHistoryEntry {
        GameHistoryEntry {
            grid: self.grid.clone(),
            region: self.region.clone(),
            move_count: self.move_count,
            total_score: self.total_score,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn initial_grid(&self) -> &Grid {
        &self.initial_grid
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Fruit currently filling the owned region.
    pub fn current_fruit(&self) -> Option<Fruit> {
        self.grid.get(self.level.start_position)
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn used_undo(&self) -> bool {
        self.used_undo
    }

    pub fn lives(&self) -> Option<u32> {
        self.lives
    }

    pub fn cells_gained_per_move(&self) -> &[usize] {
        &self.cells_gained_per_move
    }
}
