use serde::{Deserialize, Serialize};

use super::session_rng::SessionRng;
use super::types::{Fruit, GridPosition, Region};

/// Square matrix of fruits stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Fruit>>", into = "Vec<Vec<Fruit>>")]
pub struct Grid {
    cells: Vec<Fruit>,
    size: usize,
}

impl Grid {
    pub fn filled(size: usize, fruit: Fruit) -> Self {
        Self {
            cells: vec![fruit; size * size],
            size,
        }
    }

    pub fn from_rows(rows: Vec<Vec<Fruit>>) -> Result<Self, String> {
        let size = rows.len();
        if size == 0 {
            return Err("Grid must have at least one row".to_string());
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(format!(
                    "Grid must be square: row {} has {} cells, expected {}",
                    row_index,
                    row.len(),
                    size
                ));
            }
            cells.extend(row);
        }

        Ok(Self { cells, size })
    }

    pub fn from_array<const N: usize>(rows: [[Fruit; N]; N]) -> Self {
        assert!(N > 0, "Grid must have at least one row");
        Self {
            cells: rows.into_iter().flatten().collect(),
            size: N,
        }
    }

    /// Uniform pick from the first `fruit_count` catalog fruits for every cell.
    pub fn random(size: usize, fruit_count: usize, rng: &mut SessionRng) -> Self {
        let cells = (0..size * size).map(|_| rng.pick_fruit(fruit_count)).collect();
        Self { cells, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        position.is_within(self.size)
    }

    pub fn get(&self, position: GridPosition) -> Option<Fruit> {
        if !self.contains(position) {
            return None;
        }
        self.cells.get(self.index_of(position)).copied()
    }

    pub fn set(&mut self, position: GridPosition, fruit: Fruit) -> bool {
        if !self.contains(position) {
            return false;
        }
        let index = self.index_of(position);
        self.cells[index] = fruit;
        true
    }

    /// Recolors every position of `region`; positions off the grid are ignored.
    pub fn paint(&mut self, region: &Region, fruit: Fruit) {
        for &position in region {
            self.set(position, fruit);
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let size = self.size;
        (0..size * size).map(move |index| GridPosition::new(index / size, index % size))
    }

    pub fn fruits(&self) -> impl Iterator<Item = Fruit> + '_ {
        self.cells.iter().copied()
    }

    pub fn rows(&self) -> Vec<Vec<Fruit>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn is_uniform(&self) -> bool {
        self.cells.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// Highest catalog index used, plus one.
    pub fn fruits_used(&self) -> usize {
        self.cells
            .iter()
            .map(|fruit| fruit.index() + 1)
            .max()
            .unwrap_or(0)
    }

    /// One line per row, fruits as letters; owned cells are lowercase when `region` is given.
    pub fn render(&self, region: Option<&Region>) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2 + self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                let position = GridPosition::new(row, col);
                let symbol = self.cells[self.index_of(position)].symbol();
                let owned = region.is_some_and(|r| r.contains(&position));
                if col > 0 {
                    out.push(' ');
                }
                out.push(if owned { symbol.to_ascii_lowercase() } else { symbol });
            }
            out.push('\n');
        }
        out
    }

    fn index_of(&self, position: GridPosition) -> usize {
        position.row * self.size + position.col
    }
}

impl TryFrom<Vec<Vec<Fruit>>> for Grid {
    type Error = String;

    fn try_from(rows: Vec<Vec<Fruit>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<Fruit>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}

#[cfg(test)]
impl Grid {
    /// Builds a grid from letter rows such as `"NCS"`.
    pub fn from_symbols(rows: &[&str]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| Fruit::from_symbol(c).unwrap())
                    .collect()
            })
            .collect();
        Grid::from_rows(rows).unwrap()
    }
}
