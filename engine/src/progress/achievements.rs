use crate::game::{CompletionReport, ProgressTotals};
use crate::identifiers::LevelId;

/// Everything an achievement or leaderboard service needs about one completion.
#[derive(Clone, Debug, PartialEq)]
pub struct AchievementReport {
    pub level_id: LevelId,
    pub score: u32,
    pub moves: u32,
    pub stars: u8,
    pub used_undo: bool,
    pub target_moves: u32,
    pub total_levels_completed: u32,
    pub total_stars: u32,
    pub total_score: u64,
    pub perfect_levels: u32,
}

impl AchievementReport {
    pub fn new(report: &CompletionReport, totals: &ProgressTotals) -> Self {
        Self {
            level_id: report.level_id,
            score: report.score,
            moves: report.moves,
            stars: report.stars,
            used_undo: report.used_undo,
            target_moves: report.target_moves,
            total_levels_completed: totals.levels_completed,
            total_stars: totals.total_stars,
            total_score: totals.total_score,
            perfect_levels: totals.perfect_levels,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Achievement {
    FirstLevel,
    LevelMaster5,
    LevelMaster10,
    LevelMaster25,
    Perfectionist5,
    Perfectionist10,
    SpeedRunner,
    StarCollector25,
    StarCollector50,
    StarCollector100,
    NoMistakes,
}

impl Achievement {
    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstLevel => "first_level_complete",
            Achievement::LevelMaster5 => "complete_5_levels",
            Achievement::LevelMaster10 => "complete_10_levels",
            Achievement::LevelMaster25 => "complete_25_levels",
            Achievement::Perfectionist5 => "perfect_5_levels",
            Achievement::Perfectionist10 => "perfect_10_levels",
            Achievement::SpeedRunner => "complete_level_under_target",
            Achievement::StarCollector25 => "collect_25_stars",
            Achievement::StarCollector50 => "collect_50_stars",
            Achievement::StarCollector100 => "collect_100_stars",
            Achievement::NoMistakes => "complete_without_undo",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstLevel => "First Level",
            Achievement::LevelMaster5 => "Level Master (5)",
            Achievement::LevelMaster10 => "Level Master (10)",
            Achievement::LevelMaster25 => "Level Master (25)",
            Achievement::Perfectionist5 => "Perfectionist (5)",
            Achievement::Perfectionist10 => "Perfectionist (10)",
            Achievement::SpeedRunner => "Speed Runner",
            Achievement::StarCollector25 => "Star Collector (25)",
            Achievement::StarCollector50 => "Star Collector (50)",
            Achievement::StarCollector100 => "Star Collector (100)",
            Achievement::NoMistakes => "No Mistakes",
        }
    }
}

fn highest_tier<const N: usize>(value: u32, tiers: [(u32, Achievement); N]) -> Option<Achievement> {
    tiers
        .into_iter()
        .filter(|&(threshold, _)| value >= threshold)
        .map(|(_, achievement)| achievement)
        .last()
}

/// Milestone families report only their highest reached tier.
pub fn evaluate_achievements(report: &AchievementReport) -> Vec<Achievement> {
    let mut earned = Vec::new();

    if report.level_id == LevelId::new(1) {
        earned.push(Achievement::FirstLevel);
    }

    earned.extend(highest_tier(
        report.total_levels_completed,
        [
            (5, Achievement::LevelMaster5),
            (10, Achievement::LevelMaster10),
            (25, Achievement::LevelMaster25),
        ],
    ));
    earned.extend(highest_tier(
        report.total_stars,
        [
            (25, Achievement::StarCollector25),
            (50, Achievement::StarCollector50),
            (100, Achievement::StarCollector100),
        ],
    ));
    if report.stars == 3 {
        earned.extend(highest_tier(
            report.perfect_levels,
            [
                (5, Achievement::Perfectionist5),
                (10, Achievement::Perfectionist10),
            ],
        ));
    }

    if report.moves <= report.target_moves {
        earned.push(Achievement::SpeedRunner);
    }
    if !report.used_undo {
        earned.push(Achievement::NoMistakes);
    }

    earned
}
