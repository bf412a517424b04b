use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::types::Region;

/// State captured right before a move, restored verbatim by undo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistoryEntry {
    pub grid: Grid,
    pub region: Region,
    pub move_count: u32,
    pub total_score: u32,
}

impl GameHistoryEntry {
    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| format!("Failed to serialize history entry: {}", e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let entry: GameHistoryEntry = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to parse history entry: {}", e))?;

        if let Some(outside) = entry.region.iter().find(|p| !entry.grid.contains(**p)) {
            return Err(format!(
                "History entry region contains {} outside the {}x{} grid",
                outside,
                entry.grid.size(),
                entry.grid.size()
            ));
        }
        Ok(entry)
    }
}
