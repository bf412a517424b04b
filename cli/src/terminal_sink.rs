use std::io::{Stdout, Write};

use flood_engine::game::{CompletionReport, FeedbackLevel, MoveFeedback, NotificationSink};
use flood_engine::log;
use flood_engine::progress::{Achievement, AchievementReport};

/// Prints game events as plain text lines.
pub struct TerminalSink<W: Write = Stdout> {
    out: W,
    /// Set after the first failed write; later failures are not logged again.
    write_failed: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
            write_failed: false,
        }
    }
}

impl<W: Write> TerminalSink<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text)
            && !self.write_failed
        {
            self.write_failed = true;
            log!("Failed to write game output: {}", e);
        }
    }
}

fn feedback_word(feedback: FeedbackLevel) -> &'static str {
    match feedback {
        FeedbackLevel::Wasted => "no new cells",
        FeedbackLevel::Light => "small splash",
        FeedbackLevel::Medium => "nice wave",
        FeedbackLevel::Heavy => "huge flood",
    }
}

impl<W: Write> NotificationSink for TerminalSink<W> {
    fn on_move(&mut self, feedback: &MoveFeedback) {
        let mut text = format!(
            "{} -> +{} cells, +{} points ({})",
            feedback.fruit.display_name(),
            feedback.cells_gained,
            feedback.points_earned,
            feedback_word(feedback.feedback)
        );
        if feedback.big_score {
            text.push_str(" !!");
        }
        self.line(&text);
    }

    fn on_level_completed(&mut self, report: &CompletionReport) {
        self.line(&format!(
            "Level {} cleared in {} moves (par {}): {} points, {}",
            report.level_id,
            report.moves,
            report.target_moves,
            report.score,
            "*".repeat(report.stars as usize)
        ));
    }

    fn on_achievements(&mut self, report: &AchievementReport, earned: &[Achievement]) {
        for achievement in earned {
            self.line(&format!("Achievement: {}", achievement.title()));
        }
        self.line(&format!(
            "Progress: {} levels, {} stars, {} points",
            report.total_levels_completed, report.total_stars, report.total_score
        ));
    }

    fn on_life_lost(&mut self, lives_remaining: u32) {
        self.line(&format!(
            "Wrong final fruit. Lives left: {}. The board has been restored.",
            lives_remaining
        ));
    }

    fn on_game_over(&mut self) {
        self.line("Game over. Type 'reset' to try again.");
    }

    fn on_warning(&mut self, message: &str) {
        self.line(&format!("Warning: {}", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_engine::game::{Fruit, GridPosition};
    use flood_engine::LevelId;

    fn output(sink: TerminalSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_move_line_marks_big_scores() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.on_move(&MoveFeedback {
            fruit: Fruit::Cherry,
            cells_gained: 5,
            points_earned: 250,
            newly_gained_cells: vec![GridPosition::new(0, 1)],
            particle_origin: Some(GridPosition::new(0, 1)),
            feedback: FeedbackLevel::Light,
            big_score: true,
            move_count: 1,
            total_score: 250,
        });

        let text = output(sink);
        assert!(text.contains("Cherries -> +5 cells, +250 points"));
        assert!(text.trim_end().ends_with("!!"));
    }

    #[test]
    fn test_completion_shows_stars() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.on_level_completed(&CompletionReport {
            level_id: LevelId::new(4),
            score: 5600,
            moves: 8,
            stars: 3,
            efficiency: 1.0,
            used_undo: false,
            target_moves: 9,
        });

        let text = output(sink);
        assert!(text.contains("Level 4 cleared in 8 moves (par 9)"));
        assert!(text.contains("***"));
    }

    struct ClosedTerminal {
        attempts: usize,
    }

    impl Write for ClosedTerminal {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            self.attempts += 1;
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_remembered() {
        let mut sink = TerminalSink::new(ClosedTerminal { attempts: 0 });
        sink.on_game_over();
        assert!(sink.write_failed);

        sink.on_warning("still closed");
        assert!(sink.write_failed);
        assert_eq!(sink.into_inner().attempts, 2);
    }

    #[test]
    fn test_warning_is_prefixed() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.on_warning("disk full");
        assert_eq!(output(sink), "Warning: disk full\n");
    }
}
