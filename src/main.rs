//! NoGo-Solver command-line entry point.
//!
//! ## Usage
//!
//! - `nogo-solver` - Start the GTP server (same as `nogo-solver gtp`)
//! - `nogo-solver solve b:a4 w:c2` - Set up a position and solve it
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`, so stdout stays
//! a clean GTP stream.

use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nogo_solver::board::Color;
use nogo_solver::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_TIME_LIMIT_SECS, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use nogo_solver::engine::{EngineConfig, Outcome, solve};
use nogo_solver::gtp::GtpEngine;
use nogo_solver::position::Position;
use nogo_solver::solver::SolverConfig;

/// NoGo-Solver: exhaustive NoGo solver and GTP player
#[derive(Parser)]
#[command(name = "nogo-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Board size
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Time limit for solve and genmove, in seconds (0 for no limit)
    #[arg(long, global = true, default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    time_limit: u64,

    /// Try moves in board order instead of heuristic order
    #[arg(long, global = true)]
    no_heuristic: bool,

    /// Do not probe the table with symmetric positions
    #[arg(long, global = true)]
    no_symmetry: bool,

    /// Seed for random fallback moves
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GoGui
    Gtp,
    /// Play the given moves (COLOR:VERTEX, e.g. b:a4) and solve the result
    Solve {
        moves: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    ensure!(
        (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&cli.size),
        "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
        cli.size
    );

    let config = EngineConfig {
        time_limit: Duration::from_secs(cli.time_limit),
        solver: SolverConfig {
            heuristic: !cli.no_heuristic,
            symmetry: !cli.no_symmetry,
        },
    };

    match cli.command {
        Some(Commands::Solve { moves }) => run_solve(cli.size, &moves, &config),
        Some(Commands::Gtp) | None => {
            let rng = cli
                .seed
                .map(fastrand::Rng::with_seed)
                .unwrap_or_else(fastrand::Rng::new);
            let mut engine = GtpEngine::with_config(cli.size, config, rng);
            engine.run().context("GTP session failed")
        }
    }
}

fn run_solve(size: usize, moves: &[String], config: &EngineConfig) -> Result<()> {
    let mut pos = Position::new(size);
    for arg in moves {
        let (color, vertex) = arg
            .split_once(':')
            .with_context(|| format!("expected COLOR:VERTEX, got {arg:?}"))?;
        let Some(color) = Color::parse(color) else {
            bail!("unknown color in {arg:?}");
        };
        let pt = pos
            .parse_point(vertex)
            .with_context(|| format!("bad vertex in {arg:?}"))?;
        pos.play(pt, color)
            .with_context(|| format!("illegal move {arg:?}"))?;
    }

    println!("{pos}");
    println!("{} to play", pos.to_play);
    match solve(&pos, config) {
        Outcome::Win {
            winner,
            mv: Some(mv),
        } => println!("{} {}", winner.letter(), pos.format_point(mv).to_lowercase()),
        Outcome::Win { winner, mv: None } => println!("{}", winner.letter()),
        Outcome::Unknown => println!("unknown"),
    }
    Ok(())
}
