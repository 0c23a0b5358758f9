//! Weiqi-Rust: a Go rule engine with a heuristic AI opponent.
//!
//! ## Usage
//!
//! - `weiqi-rust` - Show a self-play demo
//! - `weiqi-rust gtp` - Start GTP server for GUI integration
//! - `weiqi-rust demo --size 9 --difficulty hard` - AI vs AI on a small board
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use weiqi_rust::board::Move;
use weiqi_rust::config::GameConfig;
use weiqi_rust::constants::{DEFAULT_BOARD_SIZE, KOMI, MAX_GAME_LEN_FACTOR};
use weiqi_rust::coord::move_to_vertex;
use weiqi_rust::grid::Color;
use weiqi_rust::gtp::GtpEngine;
use weiqi_rust::selector::Difficulty;

/// Weiqi-Rust: a Go engine with a heuristic AI
#[derive(Parser)]
#[command(name = "weiqi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp(GameArgs),
    /// Let the AI play itself and print the final position
    Demo(GameArgs),
}

#[derive(Args, Clone, Debug)]
struct GameArgs {
    /// Board size
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Points given to White
    #[arg(long, default_value_t = KOMI)]
    komi: f32,
    /// AI strength: easy, medium or hard
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    /// Color the AI plays by default (black or white)
    #[arg(long, default_value = "white", value_parser = parse_color)]
    ai_color: Color,
    /// Seed for reproducible AI choices
    #[arg(long)]
    seed: Option<u64>,
}

impl From<GameArgs> for GameConfig {
    fn from(a: GameArgs) -> Self {
        GameConfig {
            size: a.size,
            komi: a.komi,
            difficulty: a.difficulty,
            ai_color: a.ai_color,
            seed: a.seed,
        }
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    match s.to_ascii_lowercase().as_str() {
        "b" | "black" => Ok(Color::Black),
        "w" | "white" => Ok(Color::White),
        other => Err(format!("unknown color '{other}'")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp(args)) => {
            let config: GameConfig = args.into();
            let mut engine = GtpEngine::new(config).context("invalid game configuration")?;
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Demo(args)) => run_demo(args.into())?,
        None => run_demo(GameConfig {
            size: 9,
            ..GameConfig::default()
        })?,
    }
    Ok(())
}

fn run_demo(config: GameConfig) -> Result<()> {
    println!("Weiqi-Rust: heuristic Go AI ({} vs itself)\n", config.difficulty);

    let mut board = config.board().context("invalid game configuration")?;
    let mut black = config.selector(Color::Black);
    let mut white = config.selector(Color::White);
    let max_moves = MAX_GAME_LEN_FACTOR * config.size * config.size;

    while !board.is_game_over() && board.move_count() < max_moves {
        let selector = match board.current_player() {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        let decision = selector.get_move(&board);
        let player = board.current_player();
        board
            .play(decision.mv)
            .with_context(|| format!("{player} chose an illegal move"))?;
        if decision.mv != Move::Pass {
            info!(player = %player, rationale = %decision.rationale, "move");
        }
        println!(
            "{:>3}. {} {}",
            board.move_count(),
            player.letter(),
            move_to_vertex(decision.mv, config.size)
        );
    }

    let score = board.score();
    println!("\n{board}");
    println!(
        "Black {:.1}, White {:.1}: {}",
        score.black, score.white, score
    );
    Ok(())
}
