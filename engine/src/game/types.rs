use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const FRUIT_CATALOG_SIZE: usize = 7;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fruit {
    Nut,
    Cherry,
    Strawberry,
    #[serde(alias = "muchroom")]
    Mushroom,
    Clover,
    Berry,
    Grapes,
}

impl Fruit {
    /// Catalog order; a level with `fruit_count = n` plays with the first `n` entries.
    pub const ALL: [Fruit; FRUIT_CATALOG_SIZE] = [
        Fruit::Nut,
        Fruit::Cherry,
        Fruit::Strawberry,
        Fruit::Mushroom,
        Fruit::Clover,
        Fruit::Berry,
        Fruit::Grapes,
    ];

    pub fn available(fruit_count: usize) -> &'static [Fruit] {
        &Self::ALL[..fruit_count.min(FRUIT_CATALOG_SIZE)]
    }

    pub fn from_index(index: usize) -> Option<Fruit> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_available(self, fruit_count: usize) -> bool {
        self.index() < fruit_count
    }

    pub fn name(self) -> &'static str {
        match self {
            Fruit::Nut => "nut",
            Fruit::Cherry => "cherry",
            Fruit::Strawberry => "strawberry",
            Fruit::Mushroom => "mushroom",
            Fruit::Clover => "clover",
            Fruit::Berry => "berry",
            Fruit::Grapes => "grapes",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Fruit::Nut => "Nuts",
            Fruit::Cherry => "Cherries",
            Fruit::Strawberry => "Strawberries",
            Fruit::Mushroom => "Mushrooms",
            Fruit::Clover => "Clovers",
            Fruit::Berry => "Berries",
            Fruit::Grapes => "Grapes",
        }
    }

    /// Single-letter form for text grids.
    pub fn symbol(self) -> char {
        match self {
            Fruit::Nut => 'N',
            Fruit::Cherry => 'C',
            Fruit::Strawberry => 'S',
            Fruit::Mushroom => 'M',
            Fruit::Clover => 'L',
            Fruit::Berry => 'B',
            Fruit::Grapes => 'G',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Fruit> {
        let upper = symbol.to_ascii_uppercase();
        Self::ALL.into_iter().find(|fruit| fruit.symbol() == upper)
    }

    pub fn from_name(name: &str) -> Option<Fruit> {
        let lower = name.trim().to_ascii_lowercase();
        if lower == "muchroom" {
            return Some(Fruit::Mushroom);
        }
        Self::ALL.into_iter().find(|fruit| fruit.name() == lower)
    }
}

impl fmt::Display for Fruit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_within(self, grid_size: usize) -> bool {
        self.row < grid_size && self.col < grid_size
    }

    /// Up, down, left, right; neighbours outside the grid are skipped.
    pub fn adjacent_positions(self, grid_size: usize) -> impl Iterator<Item = GridPosition> {
        const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

        DIRECTIONS.into_iter().filter_map(move |(d_row, d_col)| {
            let row = self.row.checked_add_signed(d_row)?;
            let col = self.col.checked_add_signed(d_col)?;
            let position = GridPosition::new(row, col);
            position.is_within(grid_size).then_some(position)
        })
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Ordered so snapshots serialize deterministically.
pub type Region = BTreeSet<GridPosition>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Completed,
    GameOver,
}

/// How strongly a front end should react to a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FeedbackLevel {
    Wasted,
    Light,
    Medium,
    Heavy,
}

impl FeedbackLevel {
    pub fn for_move(cells_gained: usize, grid_size: usize) -> Self {
        if cells_gained == 0 {
            FeedbackLevel::Wasted
        } else if cells_gained >= grid_size * 2 {
            FeedbackLevel::Heavy
        } else if cells_gained >= grid_size {
            FeedbackLevel::Medium
        } else {
            FeedbackLevel::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_positions_corner() {
        let adjacent: Vec<_> = GridPosition::new(0, 0).adjacent_positions(6).collect();
        assert_eq!(adjacent, vec![GridPosition::new(1, 0), GridPosition::new(0, 1)]);
    }

    #[test]
    fn test_adjacent_positions_center() {
        let adjacent: Vec<_> = GridPosition::new(2, 3).adjacent_positions(6).collect();
        assert_eq!(adjacent.len(), 4);
        assert!(!adjacent.contains(&GridPosition::new(3, 4)));
    }

    #[test]
    fn test_adjacent_positions_far_corner() {
        let adjacent: Vec<_> = GridPosition::new(5, 5).adjacent_positions(6).collect();
        assert_eq!(adjacent, vec![GridPosition::new(4, 5), GridPosition::new(5, 4)]);
    }

    #[test]
    fn test_available_fruits_prefix_of_catalog() {
        assert_eq!(Fruit::available(3), &[Fruit::Nut, Fruit::Cherry, Fruit::Strawberry]);
        assert_eq!(Fruit::available(99).len(), FRUIT_CATALOG_SIZE);
        assert!(Fruit::Strawberry.is_available(3));
        assert!(!Fruit::Mushroom.is_available(3));
    }

    #[test]
    fn test_fruit_lookup() {
        assert_eq!(Fruit::from_index(3), Some(Fruit::Mushroom));
        assert_eq!(Fruit::from_index(7), None);
        assert_eq!(Fruit::from_symbol('l'), Some(Fruit::Clover));
        assert_eq!(Fruit::from_name("Muchroom"), Some(Fruit::Mushroom));
        assert_eq!(Fruit::from_name("grapes"), Some(Fruit::Grapes));
        assert_eq!(Fruit::from_name("banana"), None);
    }

    #[test]
    fn test_fruit_serde_accepts_legacy_spelling() {
        let fruit: Fruit = serde_yaml_ng::from_str("muchroom").unwrap();
        assert_eq!(fruit, Fruit::Mushroom);
        assert_eq!(serde_yaml_ng::to_string(&Fruit::Mushroom).unwrap().trim(), "mushroom");
    }

    #[test]
    fn test_feedback_level_thresholds() {
        assert_eq!(FeedbackLevel::for_move(0, 6), FeedbackLevel::Wasted);
        assert_eq!(FeedbackLevel::for_move(5, 6), FeedbackLevel::Light);
        assert_eq!(FeedbackLevel::for_move(6, 6), FeedbackLevel::Medium);
        assert_eq!(FeedbackLevel::for_move(12, 6), FeedbackLevel::Heavy);
    }
}
