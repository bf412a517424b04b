mod commands;
mod config;
mod render;
mod terminal_sink;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use flood_engine::game::{GameSession, Level, SessionRng, SessionSettings};
use flood_engine::levels::{LevelCatalog, LevelPack};
use flood_engine::logger::{self, LogTarget};
use flood_engine::progress::{PlayerProgress, ProgressStore};
use flood_engine::{log, LevelId};

use commands::{parse_command, Command, HELP_TEXT};
use config::{get_config_manager, CliConfig};
use render::render_state;
use terminal_sink::TerminalSink;

#[derive(Parser)]
#[command(name = "fruit_flood")]
struct Args {
    /// Config file; defaults to fruit_flood.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
    /// Start at this unlocked level instead of the next one to play.
    #[arg(long)]
    level: Option<u32>,
    /// Run seed for generated grids; each level derives its own. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Play the five tutorial levels instead of the campaign.
    #[arg(long)]
    tutorial: bool,
}

enum LevelExit {
    Quit,
    Switch(LevelId),
}

fn load_catalog(config: &CliConfig, tutorial: bool) -> Result<LevelCatalog, String> {
    match &config.levels_file {
        Some(levels_file) => LevelCatalog::from_pack(LevelPack::load(Path::new(levels_file))?),
        None if tutorial => Ok(LevelCatalog::tutorial()),
        None => Ok(LevelCatalog::campaign()),
    }
}

/// Logs only the first flush failure so a closed terminal does not flood the log.
fn prompt(flush_failed: &mut bool) {
    print!("> ");
    if let Err(e) = std::io::stdout().flush()
        && !*flush_failed
    {
        *flush_failed = true;
        log!("Failed to flush the prompt: {}", e);
    }
}

/// The requested level when it exists and is unlocked, otherwise the next level to play.
fn choose_start_level(
    requested: Option<LevelId>,
    progress: &PlayerProgress,
    catalog: &LevelCatalog,
) -> Result<LevelId, String> {
    match requested {
        Some(id) if catalog.get(id).is_none() => {
            Err(format!("There is no level {} in {}", id, catalog.name()))
        }
        Some(id) if !progress.is_unlocked(id) => Err(format!("Level {} is still locked", id)),
        Some(id) => Ok(id),
        None => progress
            .next_unlocked_level(catalog)
            .or_else(|| catalog.first())
            .map(|level| level.id)
            .ok_or_else(|| "Level catalog is empty".to_string()),
    }
}

fn play_level(
    level: Level,
    settings: &SessionSettings,
    seed: u64,
    store: &mut ProgressStore,
    catalog: &LevelCatalog,
    input: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<LevelExit, String> {
    let level_id = level.id;
    let mut session = GameSession::create(level, settings, seed, TerminalSink::stdout(), store)?;
    println!("{}", render_state(session.state()));
    let mut flush_failed = false;

    loop {
        prompt(&mut flush_failed);
        let Some(line) = input.next() else {
            return Ok(LevelExit::Quit);
        };
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{} (type 'help' for commands)", e);
                continue;
            }
        };

        match command {
            Command::Move(fruit) => match session.apply_move(fruit) {
                Ok(_) => println!("{}", render_state(session.state())),
                Err(e) => println!("{}", e),
            },
            Command::Undo => {
                if session.undo() {
                    println!("{}", render_state(session.state()));
                } else {
                    println!("Nothing to undo");
                }
            }
            Command::Reset => {
                session.reset();
                println!("{}", render_state(session.state()));
            }
            Command::Next => {
                if !session.state().is_completed() {
                    println!("Clear this level first");
                    continue;
                }
                match catalog.next_level(level_id) {
                    Some(next) => return Ok(LevelExit::Switch(next.id)),
                    None => println!("That was the last level of {}", catalog.name()),
                }
            }
            Command::Level(target) => {
                let progress = session.progress().load()?;
                match choose_start_level(Some(target), &progress, catalog) {
                    Ok(id) => return Ok(LevelExit::Switch(id)),
                    Err(e) => println!("{}", e),
                }
            }
            Command::Status => {
                let totals = session.progress().load()?.totals();
                println!(
                    "{} levels completed, {} stars, {} points, {} perfect",
                    totals.levels_completed,
                    totals.total_stars,
                    totals.total_score,
                    totals.perfect_levels
                );
            }
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => return Ok(LevelExit::Quit),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = get_config_manager(args.config.clone()).get_config()?;

    let prefix = if args.use_log_prefix || config.use_log_prefix {
        Some("FruitFlood".to_string())
    } else {
        None
    };
    logger::init_logger_with_target(prefix, LogTarget::Stderr);

    let catalog = load_catalog(&config, args.tutorial)?;
    let progress_path = config.progress_path(catalog.id());
    let mut store = ProgressStore::open(&progress_path);
    let progress = store.load()?;

    let mut level_id = choose_start_level(args.level.map(LevelId::new), &progress, &catalog)?;

    log!(
        "Playing {} ({} levels), progress in {}",
        catalog.name(),
        catalog.len(),
        progress_path.display()
    );
    println!("{}", HELP_TEXT);

    let settings = config.session_settings();
    let mut input = std::io::stdin().lock().lines();

    loop {
        let Some(level) = catalog.get(level_id).cloned() else {
            return Err(format!("Level {} is not in {}", level_id, catalog.name()).into());
        };
        let seed = args
            .seed
            .map(|run_seed| SessionRng::derive_seed(run_seed, level_id))
            .unwrap_or_else(SessionRng::random_seed);

        match play_level(level, &settings, seed, &mut store, &catalog, &mut input)? {
            LevelExit::Quit => break,
            LevelExit::Switch(next) => level_id = next,
        }
    }

    log!("Session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_engine::game::CompletionReport;

    fn cleared(level: u32) -> CompletionReport {
        CompletionReport {
            level_id: LevelId::new(level),
            score: 5000,
            moves: 10,
            stars: 2,
            efficiency: 0.8,
            used_undo: false,
            target_moves: 8,
        }
    }

    #[test]
    fn test_start_level_defaults_to_next_unlocked() {
        let catalog = LevelCatalog::campaign();
        let mut progress = PlayerProgress::default();
        progress.record(&cleared(1));

        assert_eq!(choose_start_level(None, &progress, &catalog), Ok(LevelId::new(2)));
    }

    #[test]
    fn test_requested_locked_level_rejected() {
        let catalog = LevelCatalog::campaign();
        let progress = PlayerProgress::default();

        let result = choose_start_level(Some(LevelId::new(7)), &progress, &catalog);
        assert!(result.unwrap_err().contains("locked"));
    }

    #[test]
    fn test_requested_unlocked_level_accepted() {
        let catalog = LevelCatalog::campaign();
        let mut progress = PlayerProgress::default();
        progress.record(&cleared(1));

        assert_eq!(
            choose_start_level(Some(LevelId::new(1)), &progress, &catalog),
            Ok(LevelId::new(1))
        );
    }

    #[test]
    fn test_requested_unknown_level_rejected() {
        let catalog = LevelCatalog::tutorial();
        let progress = PlayerProgress::default();

        let result = choose_start_level(Some(LevelId::new(6)), &progress, &catalog);
        assert!(result.unwrap_err().contains("no level 6"));
    }
}
