use std::collections::VecDeque;

use super::grid::Grid;
use super::types::{Fruit, GridPosition, Region};

/// Breadth-first 4-connected component of `fruit` cells containing `start`.
///
/// Returns an empty region when `start` itself does not hold `fruit`; callers
/// paint their current region first so the start cell always matches.
///
/// # Panics
///
/// Panics if `start` lies outside the grid.
pub fn connected_region(grid: &Grid, start: GridPosition, fruit: Fruit) -> Region {
    assert!(
        grid.contains(start),
        "start position {} outside {}x{} grid",
        start,
        grid.size(),
        grid.size()
    );

    let mut region = Region::new();
    if grid.get(start) != Some(fruit) {
        return region;
    }

    let mut queue = VecDeque::from([start]);
    region.insert(start);

    while let Some(current) = queue.pop_front() {
        for adjacent in current.adjacent_positions(grid.size()) {
            if grid.get(adjacent) == Some(fruit) && region.insert(adjacent) {
                queue.push_back(adjacent);
            }
        }
    }

    region
}

/// Integer-average position of `cells`, used to place score particles.
pub fn centroid<'a>(cells: impl IntoIterator<Item = &'a GridPosition>) -> Option<GridPosition> {
    let (count, row_sum, col_sum) = cells
        .into_iter()
        .fold((0usize, 0usize, 0usize), |(count, rows, cols), position| {
            (count + 1, rows + position.row, cols + position.col)
        });

    if count == 0 {
        return None;
    }
    Some(GridPosition::new(row_sum / count, col_sum / count))
}
