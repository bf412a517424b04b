use flood_engine::game::{FloodGameState, Fruit, GameStatus};

fn fruit_legend(fruits: &[Fruit]) -> String {
    fruits
        .iter()
        .enumerate()
        .map(|(index, fruit)| format!("{} {} {}", index + 1, fruit.symbol(), fruit.display_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Status header, the board with owned cells in lowercase, and the fruit legend.
pub fn render_state(state: &FloodGameState) -> String {
    let level = state.level();
    let mut header = format!(
        "{} | moves {} (par {}) | score {}",
        level.display_name(),
        state.move_count(),
        level.target_moves,
        state.total_score()
    );
    if let Some(target) = level.target_fruit {
        header.push_str(&format!(" | finish on {}", target.display_name()));
    }
    if let Some(lives) = state.lives() {
        header.push_str(&format!(" | lives {}", lives));
    }
    match state.status() {
        GameStatus::InProgress => {}
        GameStatus::Completed => header.push_str(" | CLEARED"),
        GameStatus::GameOver => header.push_str(" | GAME OVER"),
    }

    format!(
        "{}\n{}\nFruits: {}",
        header,
        state.grid().render(Some(state.region())).trim_end(),
        fruit_legend(level.available_fruits())
    )
}
