use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::scoring::{penalty_per_move, star_offsets, star_threshold};
use super::session_rng::SessionRng;
use super::types::{Fruit, GridPosition, FRUIT_CATALOG_SIZE};
use crate::config::Validate;
use crate::identifiers::LevelId;

pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 20;

/// Static description of one level. Missing keys fall back to per-field defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub id: LevelId,
    pub grid_size: usize,
    pub fruit_count: usize,
    pub start_position: GridPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_fruit: Option<Fruit>,
    pub target_moves: u32,
    pub base_score: u32,
    /// When absent the grid is generated from the session seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_grid: Option<Grid>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StarThresholds {
    pub one: u32,
    pub two: u32,
    pub three: u32,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            id: LevelId::new(1),
            grid_size: 6,
            fruit_count: 3,
            start_position: GridPosition::new(0, 0),
            target_fruit: None,
            target_moves: 10,
            base_score: 8000,
            predefined_grid: None,
        }
    }
}

impl Level {
    pub fn display_name(&self) -> String {
        format!("Level {}", self.id)
    }

    pub fn total_cells(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn penalty_per_move(&self) -> u32 {
        penalty_per_move(self.grid_size)
    }

    pub fn available_fruits(&self) -> &'static [Fruit] {
        Fruit::available(self.fruit_count)
    }

    pub fn star_thresholds(&self) -> StarThresholds {
        let penalty = self.penalty_per_move();
        let [one, two, three] = star_offsets()
            .map(|offset| star_threshold(self.base_score, self.target_moves, offset, penalty));
        StarThresholds { one, two, three }
    }

    /// The predefined grid, or a seeded random fill over the available fruits.
    pub fn initial_grid(&self, rng: &mut SessionRng) -> Grid {
        match self.predefined_grid {
            Some(ref grid) => grid.clone(),
            None => Grid::random(self.grid_size, self.fruit_count, rng),
        }
    }
}

impl Validate for Level {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < MIN_GRID_SIZE || self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "Level {}: grid size must be between {} and {}, got {}",
                self.id, MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            ));
        }
        if self.fruit_count == 0 || self.fruit_count > FRUIT_CATALOG_SIZE {
            return Err(format!(
                "Level {}: fruit count must be between 1 and {}, got {}",
                self.id, FRUIT_CATALOG_SIZE, self.fruit_count
            ));
        }
        if !self.start_position.is_within(self.grid_size) {
            return Err(format!(
                "Level {}: start position {} is outside the {}x{} grid",
                self.id, self.start_position, self.grid_size, self.grid_size
            ));
        }
        if let Some(target) = self.target_fruit
            && !target.is_available(self.fruit_count)
        {
            return Err(format!(
                "Level {}: target fruit {} is not among the first {} fruits",
                self.id, target, self.fruit_count
            ));
        }
        if self.target_moves == 0 {
            return Err(format!("Level {}: target moves must be positive", self.id));
        }
        if self.base_score == 0 {
            return Err(format!("Level {}: base score must be positive", self.id));
        }
        if let Some(ref grid) = self.predefined_grid {
            if grid.size() != self.grid_size {
                return Err(format!(
                    "Level {}: predefined grid is {}x{}, expected {}x{}",
                    self.id,
                    grid.size(),
                    grid.size(),
                    self.grid_size,
                    self.grid_size
                ));
            }
            if grid.fruits_used() > self.fruit_count {
                return Err(format!(
                    "Level {}: predefined grid uses fruits beyond the first {}",
                    self.id, self.fruit_count
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let level: Level = serde_yaml_ng::from_str("id: 4\ngrid_size: 8\n").unwrap();
        assert_eq!(level.id, LevelId::new(4));
        assert_eq!(level.grid_size, 8);
        assert_eq!(level.fruit_count, 3);
        assert_eq!(level.target_moves, 10);
        assert_eq!(level.base_score, 8000);
        assert_eq!(level.start_position, GridPosition::new(0, 0));
        assert!(level.target_fruit.is_none());
        assert!(level.predefined_grid.is_none());
    }

    #[test]
    fn test_parses_snake_case_level_with_grid() {
        let yaml = "\
id: 2
grid_size: 2
fruit_count: 2
start_position: { row: 1, col: 0 }
target_fruit: cherry
target_moves: 3
base_score: 5000
predefined_grid:
  - [nut, cherry]
  - [cherry, nut]
";
        let level: Level = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(level.target_fruit, Some(Fruit::Cherry));
        assert_eq!(level.predefined_grid.as_ref().map(Grid::size), Some(2));
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_start_outside_grid() {
        let level = Level {
            start_position: GridPosition::new(6, 0),
            ..Level::default()
        };
        assert!(level.validate().unwrap_err().contains("outside"));
    }

    #[test]
    fn test_validate_rejects_unavailable_target() {
        let level = Level {
            target_fruit: Some(Fruit::Grapes),
            ..Level::default()
        };
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_grid_size_mismatch() {
        let level = Level {
            predefined_grid: Some(Grid::filled(5, Fruit::Nut)),
            ..Level::default()
        };
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_grid_with_extra_fruits() {
        let level = Level {
            fruit_count: 2,
            predefined_grid: Some(Grid::filled(6, Fruit::Strawberry)),
            ..Level::default()
        };
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_initial_grid_prefers_predefined() {
        let grid = Grid::filled(6, Fruit::Cherry);
        let level = Level {
            predefined_grid: Some(grid.clone()),
            ..Level::default()
        };
        assert_eq!(level.initial_grid(&mut SessionRng::new(1)), grid);
    }

    #[test]
    fn test_star_thresholds_use_grid_penalty() {
        let level = Level {
            grid_size: 10,
            base_score: 20000,
            target_moves: 18,
            ..Level::default()
        };
        let thresholds = level.star_thresholds();
        assert_eq!(thresholds.three, 20000 - 18 * 500);
        assert_eq!(thresholds.two, 20000 - 21 * 500);
        assert_eq!(thresholds.one, 20000 - 26 * 500);
    }
}
