//! Line-based text protocol for driving a game from a terminal or a GUI.
//!
//! The framing follows the Go Text Protocol: each request is an optional
//! numeric id, a command name and arguments; each reply starts with `=` on
//! success or `?` on failure, echoes the id and ends with a blank line.
//!
//! ## Supported Commands
//!
//! - `name` / `version` - Engine identification
//! - `list_commands` / `known_command <cmd>` - Command discovery
//! - `newgame [size] [mode]` - Start a new game (size S/M/L or 6/8/10, mode solo/duel)
//! - `boardsize <n>` - Start a new game on an n x n board
//! - `play <col> <row>` - Play a move for the player on move
//! - `genmove` - Let the random player move for the player on move
//! - `pass` - Pass when no legal move exists
//! - `moves` - List legal destinations as `col,row`
//! - `hint` - Suggest a random legal move as `col,row col,row` (from, to)
//! - `score` / `turn` / `result` - Game state
//! - `showboard` - Print the board
//! - `quit` - Exit
//!
//! ## Example
//!
//! ```ignore
//! use othello_rs::game::GameConfig;
//! use othello_rs::protocol::TextEngine;
//! let mut engine = TextEngine::new(GameConfig::default()).unwrap();
//! engine.run().unwrap();
//! ```

use std::io::{self, BufRead, Write};

use log::debug;

use crate::board::{BoardError, Coord, Player};
use crate::game::{BoardSize, GameConfig, GameSession, Mode, Turn};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "genmove",
    "hint",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "newgame",
    "pass",
    "play",
    "quit",
    "result",
    "score",
    "showboard",
    "turn",
    "version",
];

/// Text protocol engine wrapping one game session.
pub struct TextEngine {
    session: GameSession,
}

impl TextEngine {
    pub fn new(config: GameConfig) -> Result<Self, BoardError> {
        Ok(Self {
            session: GameSession::new(config)?,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock(), io::stdout())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!("command {command} {args:?}");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "newgame" => {
                if args.is_empty() {
                    return match self.session.restart() {
                        Ok(()) => (true, String::new()),
                        Err(e) => (false, e.to_string()),
                    };
                }
                let mut config = self.session.config().clone();
                for arg in args {
                    if let Ok(size) = arg.parse::<BoardSize>() {
                        config.size = size;
                    } else if let Ok(mode) = arg.parse::<Mode>() {
                        config.mode = mode;
                    } else {
                        return (false, format!("unknown newgame argument {arg:?}"));
                    }
                }
                self.start(config)
            }

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<BoardSize>() {
                    Ok(size) => {
                        let config = GameConfig {
                            size,
                            ..self.session.config().clone()
                        };
                        self.start(config)
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let (Ok(col), Ok(row)) = (args[0].parse::<usize>(), args[1].parse::<usize>())
                else {
                    return (false, "invalid coordinate".to_string());
                };
                match self.session.play(Coord::new(col, row)) {
                    Ok(turn) => (true, describe(&turn)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match self.session.genmove() {
                Ok(turn) => (true, describe(&turn)),
                Err(e) => (false, e.to_string()),
            },

            "pass" => match self.session.pass() {
                Ok(_) => (true, String::new()),
                Err(e) => (false, e.to_string()),
            },

            "moves" => {
                let player = self.session.current_player();
                let targets: Vec<String> = self
                    .session
                    .board()
                    .legal_targets(player)
                    .into_iter()
                    .map(short_coord)
                    .collect();
                (true, targets.join(" "))
            }

            "hint" => match self.session.hint() {
                Some(mv) => (
                    true,
                    format!("{} {}", short_coord(mv.from), short_coord(mv.to)),
                ),
                None => (true, "none".to_string()),
            },

            "score" => {
                let black = self.session.score(Player::Black);
                let white = self.session.score(Player::White);
                (true, format!("black {black} white {white}"))
            }

            "turn" => (true, self.session.current_player().to_string()),

            "showboard" => (true, format!("\n{}", self.session.board())),

            "result" => match self.session.status() {
                Some(outcome) => (true, outcome.to_string()),
                None => (true, "none".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn start(&mut self, config: GameConfig) -> (bool, String) {
        match self.session.new_game(config) {
            Ok(()) => (true, String::new()),
            Err(e) => (false, e.to_string()),
        }
    }
}

fn short_coord(at: Coord) -> String {
    format!("{},{}", at.col, at.row)
}

fn describe(turn: &Turn) -> String {
    match turn {
        Turn::Moved(report) => format!(
            "{} flipped {} bonus {}",
            short_coord(report.placed),
            report.flipped.len(),
            report.bonus_gained
        ),
        Turn::Passed(player) => format!("{player} passes"),
        Turn::Finished(outcome) => format!("game over: {outcome}"),
    }
}
