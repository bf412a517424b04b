use crate::game::{Fruit, Grid, GridPosition, Level};
use crate::identifiers::LevelId;

use super::LevelPack;

use Fruit::{Cherry as C, Mushroom as M, Nut as N, Strawberry as S};

const TUTORIAL_BASE_SCORE: u32 = 8000;

fn tutorial_level(
    id: u32,
    fruit_count: usize,
    start_position: GridPosition,
    target_moves: u32,
    grid: [[Fruit; 6]; 6],
) -> Level {
    Level {
        id: LevelId::new(id),
        grid_size: 6,
        fruit_count,
        start_position,
        target_fruit: None,
        target_moves,
        base_score: TUTORIAL_BASE_SCORE,
        predefined_grid: Some(Grid::from_array(grid)),
    }
}

/// The five hand-designed 6x6 introduction levels.
pub fn tutorial_pack() -> LevelPack {
    let corner = GridPosition::new(0, 0);
    let levels = vec![
        tutorial_level(
            1,
            3,
            corner,
            8,
            [
                [N, C, N, C, N, C],
                [C, N, C, N, C, N],
                [N, C, S, S, C, N],
                [C, N, S, S, N, C],
                [N, C, N, C, N, C],
                [C, N, C, N, C, N],
            ],
        ),
        tutorial_level(
            2,
            3,
            corner,
            10,
            [
                [N, N, C, C, N, N],
                [N, S, C, C, S, N],
                [S, S, N, N, S, S],
                [S, S, N, N, S, S],
                [N, S, C, C, S, N],
                [N, N, C, C, N, N],
            ],
        ),
        tutorial_level(
            3,
            4,
            corner,
            12,
            [
                [N, C, S, M, S, C],
                [C, S, M, S, C, N],
                [S, M, N, C, M, S],
                [M, S, C, N, S, M],
                [S, C, M, S, C, N],
                [C, N, S, M, N, C],
            ],
        ),
        tutorial_level(
            4,
            3,
            GridPosition::new(2, 2),
            9,
            [
                [C, C, N, N, S, S],
                [C, C, N, N, S, S],
                [S, S, N, N, C, C],
                [S, S, N, N, C, C],
                [N, N, S, S, N, N],
                [N, N, S, S, N, N],
            ],
        ),
        tutorial_level(
            5,
            4,
            corner,
            11,
            [
                [N, C, S, M, S, C],
                [C, N, C, S, M, S],
                [S, C, N, C, S, M],
                [M, S, C, N, C, S],
                [S, M, S, C, N, C],
                [C, S, M, S, C, N],
            ],
        ),
    ];

    LevelPack {
        id: "tutorial".to_string(),
        name: "Tutorial".to_string(),
        emoji: "🌰".to_string(),
        levels,
    }
}

fn campaign_level(id: u32) -> Level {
    let (grid_size, fruit_count, start, target_moves, base_score) = match id {
        1..=20 => {
            let n = id - 1;
            (6, (3 + n / 5).min(4), 0, 8 + n / 3, 8000)
        }
        21..=40 => {
            let n = id - 21;
            (8, (3 + n / 4).min(5), 1, 12 + n / 2, 12000)
        }
        _ => {
            let n = id.saturating_sub(41);
            (10, (4 + n / 3).min(6), 2, 18 + n, 20000)
        }
    };

    Level {
        id: LevelId::new(id),
        grid_size,
        fruit_count: fruit_count as usize,
        start_position: GridPosition::new(start, start),
        target_fruit: None,
        target_moves,
        base_score,
        predefined_grid: None,
    }
}

const CAMPAIGN_LEVEL_COUNT: u32 = 60;

pub const CAMPAIGN_PACK_ID: &str = "campaign";

/// Sixty generated levels in three difficulty bands: 6x6, 8x8 and 10x10.
pub fn campaign_pack() -> LevelPack {
    LevelPack {
        id: CAMPAIGN_PACK_ID.to_string(),
        name: "Campaign".to_string(),
        emoji: "🍒".to_string(),
        levels: (1..=CAMPAIGN_LEVEL_COUNT).map(campaign_level).collect(),
    }
}
