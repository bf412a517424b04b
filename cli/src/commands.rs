use flood_engine::game::Fruit;
use flood_engine::LevelId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Fruit),
    Undo,
    Reset,
    Next,
    Level(LevelId),
    Status,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  <fruit>       flood with a fruit: letter (N, C, S, M, L, B, G), name, or number 1-7
  u, undo       take back the last move
  r, reset      restart the level
  n, next       go to the next level after clearing
  level <id>    play a specific unlocked level
  s, status     show progress totals
  h, help       show this help
  q, quit       leave the game";

/// Parses one line of player input. Numbers select fruits by 1-based catalog position.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Empty command".to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or_default().to_ascii_lowercase();
    let argument = parts.next();
    if parts.next().is_some() {
        return Err(format!("Too many arguments in '{}'", trimmed));
    }

    let command = match (head.as_str(), argument) {
        ("u" | "undo", None) => Command::Undo,
        ("r" | "reset", None) => Command::Reset,
        ("n" | "next", None) => Command::Next,
        ("s" | "status", None) => Command::Status,
        ("h" | "help" | "?", None) => Command::Help,
        ("q" | "quit" | "exit", None) => Command::Quit,
        ("level" | "l", Some(id)) => {
            let id = id
                .parse::<u32>()
                .map_err(|_| format!("'{}' is not a level number", id))?;
            Command::Level(LevelId::new(id))
        }
        (_, None) => Command::Move(parse_fruit(&head)?),
        _ => return Err(format!("Unknown command '{}'", trimmed)),
    };

    Ok(command)
}

fn parse_fruit(token: &str) -> Result<Fruit, String> {
    if let Ok(number) = token.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(Fruit::from_index)
            .ok_or_else(|| format!("Fruit number must be between 1 and {}", Fruit::ALL.len()));
    }

    let mut chars = token.chars();
    if let (Some(symbol), None) = (chars.next(), chars.next())
        && let Some(fruit) = Fruit::from_symbol(symbol)
    {
        return Ok(fruit);
    }

    Fruit::from_name(token).ok_or_else(|| format!("Unknown fruit '{}'", token))
}
