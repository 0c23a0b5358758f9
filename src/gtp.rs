//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements GTP version 2, allowing the engine to be used
//! with graphical Go interfaces like Sabaki, GoGui, or Lizzie.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return GTP protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <size>` - Set board size and clear the board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi
//! - `play <color> <vertex>` - Play a move. The color must be the side to
//!   move; consecutive same-color stones (free handicap placement) are
//!   rejected, so handicap setup is not supported
//! - `genmove <color>` - Generate and play a move for the given color
//! - `showboard` - Render the board
//! - `final_score` - Score the current position
//! - `difficulty <easy|medium|hard>` - Change the AI tier (extension)
//!
//! ## Example
//!
//! ```ignore
//! use weiqi_rust::config::GameConfig;
//! use weiqi_rust::gtp::GtpEngine;
//! let mut engine = GtpEngine::new(GameConfig::default())?;
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::board::{Board, Move};
use crate::config::GameConfig;
use crate::coord::{move_to_vertex, parse_vertex};
use crate::error::GoError;
use crate::grid::Color;
use crate::selector::{Difficulty, MoveSelector};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "difficulty",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    board: Board,
    /// Plays whichever color `genmove` asks for.
    ai: MoveSelector,
    size: usize,
    komi: f32,
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

impl GtpEngine {
    pub fn new(config: GameConfig) -> Result<Self, GoError> {
        let board = config.board()?;
        let ai = config.selector(config.ai_color);
        Ok(Self {
            board,
            ai,
            size: config.size,
            komi: config.komi,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        info!(size = self.size, difficulty = %self.ai.difficulty(), "gtp engine ready");

        for line in stdin.lock().lines() {
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

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let mut chars = trimmed.char_indices();

        if let Some((_, c)) = chars.next() {
            if c.is_ascii_digit() {
                let end = chars
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map(|(i, _)| i)
                    .unwrap_or(trimmed.len());

                if let Ok(id) = trimmed[..end].parse::<u32>() {
                    return (Some(id), trimmed[end..].trim());
                }
            }
        }

        (None, trimmed)
    }

    fn reset(&mut self) -> Result<(), GoError> {
        self.board = Board::new(self.size)?.with_komi(self.komi);
        Ok(())
    }

    /// Execute a GTP command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "gtp command");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let Ok(size) = args[0].parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                let previous = self.size;
                self.size = size;
                match self.reset() {
                    Ok(()) => (true, String::new()),
                    Err(_) => {
                        self.size = previous;
                        (false, "unacceptable size".to_string())
                    }
                }
            }

            "clear_board" => match self.reset() {
                Ok(()) => (true, String::new()),
                Err(e) => (false, e.to_string()),
            },

            "komi" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<f32>() {
                    Ok(komi) if komi.is_finite() => {
                        self.komi = komi;
                        self.board = self.board.clone().with_komi(komi);
                        (true, String::new())
                    }
                    _ => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };
                if color != self.board.current_player() {
                    return (false, "illegal move: wrong color to move".to_string());
                }
                let Some(mv) = parse_vertex(args[1], self.size) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.board.play(mv) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let Some(color) = parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };
                if color != self.board.current_player() {
                    return (false, "wrong color to move".to_string());
                }

                // If opponent passed and we're past the opening, pass too
                let opponent_passed = self
                    .board
                    .history()
                    .last()
                    .is_some_and(|r| r.mv == Move::Pass);
                let mv = if opponent_passed && self.board.move_count() > 2 {
                    Move::Pass
                } else {
                    self.ai.set_color(color);
                    let decision = self.ai.get_move(&self.board);
                    info!(rationale = %decision.rationale, "genmove");
                    decision.mv
                };

                match self.board.play(mv) {
                    Ok(_) => (true, move_to_vertex(mv, self.size)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.board)),

            "final_score" => (true, self.board.score().to_string()),

            "difficulty" => {
                if args.is_empty() {
                    return (true, self.ai.difficulty().to_string());
                }
                match args[0].parse::<Difficulty>() {
                    Ok(d) => {
                        self.ai.set_difficulty(d);
                        (true, String::new())
                    }
                    Err(e) => (false, e),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
