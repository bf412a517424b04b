use std::path::PathBuf;

use crate::config::{
    ConfigContentProvider, ConfigManager, FileContentConfigProvider, YamlConfigSerializer,
};
use crate::game::{CompletionReport, ProgressSink, ProgressTotals};

use super::PlayerProgress;

/// Player progress persisted as YAML; every completion is merged and written immediately.
pub struct ProgressStore<TProvider = FileContentConfigProvider>
where
    TProvider: ConfigContentProvider,
{
    manager: ConfigManager<TProvider, PlayerProgress>,
}

impl ProgressStore<FileContentConfigProvider> {
    pub fn open(file_path: impl Into<PathBuf>) -> Self {
        Self {
            manager: ConfigManager::from_yaml_file(file_path),
        }
    }
}

impl<TProvider> ProgressStore<TProvider>
where
    TProvider: ConfigContentProvider,
{
    pub fn with_provider(provider: TProvider) -> Self {
        Self {
            manager: ConfigManager::new(provider, YamlConfigSerializer::new()),
        }
    }

    pub fn load(&self) -> Result<PlayerProgress, String> {
        self.manager.get_config()
    }
}

impl<TProvider> ProgressSink for ProgressStore<TProvider>
where
    TProvider: ConfigContentProvider,
{
    fn record_completion(&mut self, report: &CompletionReport) -> Result<ProgressTotals, String> {
        self.manager
            .update_config(|progress| Ok(progress.record(report)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentConfigProvider;
    use crate::identifiers::LevelId;

    fn report(score: u32) -> CompletionReport {
        CompletionReport {
            level_id: LevelId::new(1),
            score,
            moves: 9,
            stars: 2,
            efficiency: 0.9,
            used_undo: false,
            target_moves: 8,
        }
    }

    #[test]
    fn test_completion_is_persisted() {
        let mut store = ProgressStore::with_provider(MemoryContentConfigProvider::new());

        let totals = store.record_completion(&report(5300)).unwrap();

        assert_eq!(totals.total_score, 5300);
        assert_eq!(store.load().unwrap().total_score(), 5300);
    }

    #[test]
    fn test_corrupt_store_reports_error() {
        let mut store =
            ProgressStore::with_provider(MemoryContentConfigProvider::with_content("levels: [oops"));

        assert!(store.record_completion(&report(5300)).is_err());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("fruit_flood_store_{}", std::process::id()));
        let path = dir.join("progress.yaml");
        let _ = std::fs::remove_file(&path);

        let mut store = ProgressStore::open(&path);
        store.record_completion(&report(4700)).unwrap();

        let reopened = ProgressStore::open(&path);
        let progress = reopened.load().unwrap();
        assert!(progress.is_unlocked(LevelId::new(2)));
        assert_eq!(progress.score_for(LevelId::new(1)), 4700);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
