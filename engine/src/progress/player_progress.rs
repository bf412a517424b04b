use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::game::{CompletionReport, Level, ProgressSink, ProgressTotals};
use crate::identifiers::LevelId;
use crate::levels::LevelCatalog;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub best_score: u32,
    pub stars: u8,
    /// Fewest moves over all clears.
    pub best_moves: u32,
    /// Cleared only by a later run without undo.
    pub used_undo: bool,
    pub completion_count: u32,
    pub best_efficiency: f64,
}

/// Cumulative player progress with best-score-wins merging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    levels: BTreeMap<LevelId, LevelRecord>,
    unlocked: BTreeSet<LevelId>,
    total_score: u64,
    total_stars: u32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            levels: BTreeMap::new(),
            unlocked: BTreeSet::from([LevelId::new(1)]),
            total_score: 0,
            total_stars: 0,
        }
    }
}

impl PlayerProgress {
    /// A replay only raises totals by its improvement over the stored best.
    pub fn record(&mut self, report: &CompletionReport) -> ProgressTotals {
        match self.levels.get_mut(&report.level_id) {
            None => {
                self.levels.insert(
                    report.level_id,
                    LevelRecord {
                        best_score: report.score,
                        stars: report.stars,
                        best_moves: report.moves,
                        used_undo: report.used_undo,
                        completion_count: 1,
                        best_efficiency: report.efficiency,
                    },
                );
                self.total_score += report.score as u64;
                self.total_stars += report.stars as u32;
                if let Some(next) = report.level_id.next() {
                    self.unlocked.insert(next);
                }
            }
            Some(record) => {
                if report.score > record.best_score {
                    self.total_score += (report.score - record.best_score) as u64;
                    record.best_score = report.score;
                }
                if report.stars > record.stars {
                    self.total_stars += (report.stars - record.stars) as u32;
                    record.stars = report.stars;
                }
                record.best_moves = record.best_moves.min(report.moves);
                if !report.used_undo {
                    record.used_undo = false;
                }
                record.best_efficiency = record.best_efficiency.max(report.efficiency);
                record.completion_count += 1;
            }
        }

        self.totals()
    }

    pub fn totals(&self) -> ProgressTotals {
        ProgressTotals {
            levels_completed: self.levels_completed(),
            total_stars: self.total_stars,
            total_score: self.total_score,
            perfect_levels: self.levels.values().filter(|r| r.stars == 3).count() as u32,
        }
    }

    pub fn levels_completed(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn total_stars(&self) -> u32 {
        self.total_stars
    }

    pub fn record_for(&self, level_id: LevelId) -> Option<&LevelRecord> {
        self.levels.get(&level_id)
    }

    pub fn is_unlocked(&self, level_id: LevelId) -> bool {
        self.unlocked.contains(&level_id)
    }

    pub fn is_completed(&self, level_id: LevelId) -> bool {
        self.levels.contains_key(&level_id)
    }

    pub fn stars_for(&self, level_id: LevelId) -> u8 {
        self.levels.get(&level_id).map_or(0, |r| r.stars)
    }

    pub fn score_for(&self, level_id: LevelId) -> u32 {
        self.levels.get(&level_id).map_or(0, |r| r.best_score)
    }

    /// First unlocked level not yet cleared, else the first unlocked level.
    pub fn next_unlocked_level<'a>(&self, catalog: &'a LevelCatalog) -> Option<&'a Level> {
        catalog
            .levels()
            .iter()
            .find(|level| self.is_unlocked(level.id) && !self.is_completed(level.id))
            .or_else(|| catalog.levels().iter().find(|level| self.is_unlocked(level.id)))
    }
}

impl Validate for PlayerProgress {
    fn validate(&self) -> Result<(), String> {
        if self.unlocked.is_empty() {
            return Err("Progress must have at least one unlocked level".to_string());
        }
        if let Some((id, _)) = self.levels.iter().find(|(_, r)| r.stars == 0 || r.stars > 3) {
            return Err(format!("Level {} has an invalid star count", id));
        }
        let star_sum: u32 = self.levels.values().map(|r| r.stars as u32).sum();
        if star_sum != self.total_stars {
            return Err(format!(
                "Total stars {} do not match per-level stars {}",
                self.total_stars, star_sum
            ));
        }
        let score_sum: u64 = self.levels.values().map(|r| r.best_score as u64).sum();
        if score_sum != self.total_score {
            return Err(format!(
                "Total score {} does not match per-level best scores {}",
                self.total_score, score_sum
            ));
        }
        Ok(())
    }
}

impl ProgressSink for PlayerProgress {
    fn record_completion(&mut self, report: &CompletionReport) -> Result<ProgressTotals, String> {
        Ok(self.record(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(level: u32, score: u32, stars: u8, moves: u32, used_undo: bool) -> CompletionReport {
        CompletionReport {
            level_id: LevelId::new(level),
            score,
            moves,
            stars,
            efficiency: 0.8,
            used_undo,
            target_moves: 8,
        }
    }

    #[test]
    fn test_default_unlocks_first_level() {
        let progress = PlayerProgress::default();
        assert!(progress.is_unlocked(LevelId::new(1)));
        assert!(!progress.is_unlocked(LevelId::new(2)));
        assert!(progress.validate().is_ok());
    }

    #[test]
    fn test_first_clear_adds_totals_and_unlocks_next() {
        let mut progress = PlayerProgress::default();

        let totals = progress.record(&report(1, 5000, 2, 10, false));

        assert_eq!(totals.levels_completed, 1);
        assert_eq!(totals.total_score, 5000);
        assert_eq!(totals.total_stars, 2);
        assert!(progress.is_unlocked(LevelId::new(2)));
    }

    #[test]
    fn test_clearing_last_possible_id_unlocks_nothing() {
        let mut progress = PlayerProgress::default();

        let totals = progress.record(&report(u32::MAX, 5000, 2, 10, false));

        assert_eq!(totals.levels_completed, 1);
        assert!(progress.is_completed(LevelId::new(u32::MAX)));
        assert_eq!(progress.unlocked.len(), 1);
    }

    #[test]
    fn test_replay_adds_only_positive_delta() {
        let mut progress = PlayerProgress::default();
        progress.record(&report(1, 5000, 2, 10, true));

        progress.record(&report(1, 4000, 1, 9, true));
        assert_eq!(progress.total_score(), 5000);
        assert_eq!(progress.total_stars(), 2);
        assert_eq!(progress.record_for(LevelId::new(1)).unwrap().best_moves, 9);

        progress.record(&report(1, 5600, 3, 11, false));
        assert_eq!(progress.total_score(), 5600);
        assert_eq!(progress.total_stars(), 3);
        assert_eq!(progress.levels_completed(), 1);

        let record = progress.record_for(LevelId::new(1)).unwrap();
        assert_eq!(record.completion_count, 3);
        assert!(!record.used_undo);
        assert_eq!(record.best_moves, 9);
        assert!(progress.validate().is_ok());
    }

    #[test]
    fn test_dirty_replay_keeps_clean_flag() {
        let mut progress = PlayerProgress::default();
        progress.record(&report(1, 5000, 2, 10, false));
        progress.record(&report(1, 5000, 2, 10, true));
        assert!(!progress.record_for(LevelId::new(1)).unwrap().used_undo);
    }

    #[test]
    fn test_perfect_levels_counted() {
        let mut progress = PlayerProgress::default();
        progress.record(&report(1, 5600, 3, 8, false));
        let totals = progress.record(&report(2, 4000, 2, 12, false));
        assert_eq!(totals.perfect_levels, 1);
    }

    #[test]
    fn test_next_unlocked_level() {
        let catalog = LevelCatalog::campaign();
        let mut progress = PlayerProgress::default();
        assert_eq!(progress.next_unlocked_level(&catalog).map(|l| l.id), Some(LevelId::new(1)));

        progress.record(&report(1, 5000, 2, 10, false));
        assert_eq!(progress.next_unlocked_level(&catalog).map(|l| l.id), Some(LevelId::new(2)));
    }

    #[test]
    fn test_next_unlocked_falls_back_when_all_cleared() {
        let catalog = LevelCatalog::tutorial();
        let mut progress = PlayerProgress::default();
        for id in 1..=5 {
            progress.record(&report(id, 5000, 2, 10, false));
        }
        assert_eq!(progress.next_unlocked_level(&catalog).map(|l| l.id), Some(LevelId::new(1)));
    }

    #[test]
    fn test_validate_detects_tampered_totals() {
        let mut progress = PlayerProgress::default();
        progress.record(&report(1, 5000, 2, 10, false));
        progress.total_stars = 9;
        assert!(progress.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut progress = PlayerProgress::default();
        progress.record(&report(1, 5000, 2, 10, false));
        progress.record(&report(2, 6100, 3, 7, true));

        let yaml = serde_yaml_ng::to_string(&progress).unwrap();
        let restored: PlayerProgress = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(restored, progress);
    }
}
