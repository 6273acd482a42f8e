//! Go Text Protocol (GTP) front end for the NoGo solver.
//!
//! Implements GTP version 2 plus the GoGui rules extension, so the engine can
//! be driven by GoGui or by regression scripts. Responses are written as
//! `= msg` or `? msg` followed by a blank line; an optional numeric command
//! id is echoed after the prefix.
//!
//! ## Supported Commands
//!
//! - `protocol_version`, `name`, `version`, `known_command`, `list_commands`, `quit`
//! - `boardsize <size>`, `clear_board`, `showboard`, `komi <value>`
//! - `play <color> <vertex>`, `legal_moves <color>`, `genmove <color>`
//! - `solve` - `b` or `w` for the winner, plus a winning move if the mover wins
//! - `evaluate` - heuristic score for the player to move
//! - `checkhash` - 1D and 2D fingerprints of the position (always equal)
//! - `timelimit <seconds>` - budget for `solve` and `genmove`
//! - `gogui-rules_*`, `gogui-analyze_commands`
//!
//! ## Example
//!
//! ```
//! use nogo_solver::gtp::GtpEngine;
//!
//! let mut engine = GtpEngine::new();
//! let mut out = Vec::new();
//! engine.serve("boardsize 2\nsolve\n".as_bytes(), &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! // Black moves first on an empty 2x2 board and wins.
//! assert!(text.contains("= b "));
//! ```

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, trace};

use crate::board::{Board, Color};
use crate::constants::{DEFAULT_BOARD_SIZE, ENGINE_NAME, GAME_ID, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::engine::{EngineConfig, GenMove, Outcome, generate_move, solve};
use crate::heuristic::evaluate;
use crate::position::{Point, Position};
use crate::transposition::TranspositionTable;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "checkhash",
    "clear_board",
    "evaluate",
    "genmove",
    "gogui-analyze_commands",
    "gogui-rules_board",
    "gogui-rules_board_size",
    "gogui-rules_final_result",
    "gogui-rules_game_id",
    "gogui-rules_legal_moves",
    "gogui-rules_side_to_move",
    "known_command",
    "komi",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "solve",
    "timelimit",
    "version",
];

const ANALYZE_COMMANDS: &str = "pstring/Legal Moves For ToPlay/gogui-rules_legal_moves\n\
pstring/Side to Play/gogui-rules_side_to_move\n\
pstring/Final Result/gogui-rules_final_result\n\
pstring/Board Size/gogui-rules_board_size\n\
pstring/Rules GameID/gogui-rules_game_id\n\
pstring/Show Board/gogui-rules_board";

/// Required argument count and usage message for commands that take arguments.
fn usage(command: &str) -> Option<(usize, &'static str)> {
    Some(match command {
        "boardsize" => (1, "Usage: boardsize INT"),
        "komi" => (1, "Usage: komi FLOAT"),
        "known_command" => (1, "Usage: known_command CMD_NAME"),
        "genmove" => (1, "Usage: genmove {w,b}"),
        "play" => (2, "Usage: play {b,w} MOVE"),
        "legal_moves" => (1, "Usage: legal_moves {w,b}"),
        "timelimit" => (1, "Usage: timelimit INT"),
        _ => return None,
    })
}

/// A command that could not be executed. Rendered as `? <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GtpError {
    #[error("{0}")]
    Usage(&'static str),
    #[error("unknown command")]
    UnknownCommand,
    #[error("{0}")]
    InvalidArgument(String),
}

/// GTP engine state.
pub struct GtpEngine {
    /// Current game position
    pos: Position,
    /// Time limit and search options for `solve` / `genmove`
    config: EngineConfig,
    /// Source for random fallback moves
    rng: fastrand::Rng,
    /// Accepted for protocol compatibility; NoGo has no score
    komi: f32,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Create a new GTP engine with default settings.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BOARD_SIZE, EngineConfig::default(), fastrand::Rng::new())
    }

    pub fn with_config(size: usize, config: EngineConfig, rng: fastrand::Rng) -> Self {
        Self {
            pos: Position::new(size),
            config,
            rng,
            komi: 0.0,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    /// Run the GTP command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the GTP command loop over arbitrary streams until `quit` or EOF.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
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
            trace!(%command, ?args, "gtp command");

            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            match self.execute(&command, args) {
                Ok(message) => write!(output, "={id_str} {message}\n\n")?,
                Err(err) => {
                    debug!(%command, %err, "gtp command failed");
                    write!(output, "?{id_str} {err}\n\n")?
                }
            }
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
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return the response text.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, GtpError> {
        if let Some((argc, message)) = usage(command) {
            if args.len() != argc {
                return Err(GtpError::Usage(message));
            }
        }

        match command {
            "protocol_version" => Ok("2".to_string()),

            "name" => Ok(ENGINE_NAME.to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                Ok(if known { "true" } else { "false" }.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => match args[0].parse::<usize>() {
                Ok(size) if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) => {
                    self.pos.reset(size);
                    Ok(String::new())
                }
                _ => Err(GtpError::InvalidArgument(format!(
                    "unacceptable size, expected {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
                ))),
            },

            "clear_board" => {
                self.pos.reset(self.pos.size);
                Ok(String::new())
            }

            "showboard" => Ok(format!("\n{}", self.pos.to_string().trim_end())),

            "komi" => match args[0].parse::<f32>() {
                Ok(komi) => {
                    self.komi = komi;
                    Ok(String::new())
                }
                Err(_) => Err(GtpError::InvalidArgument("invalid komi".to_string())),
            },

            "play" => Ok(self.play(args[0], args[1])),

            "legal_moves" => {
                let color = parse_color(args[0])?;
                Ok(self.sorted_moves(&self.pos.legal_moves(color)))
            }

            "genmove" => {
                let color = parse_color(args[0])?;
                match generate_move(&mut self.pos, color, &self.config, &mut self.rng) {
                    GenMove::Play(mv) => Ok(self.pos.format_point(mv)),
                    GenMove::Resign => Ok("resign".to_string()),
                }
            }

            "solve" => Ok(match solve(&self.pos, &self.config) {
                Outcome::Win {
                    winner,
                    mv: Some(mv),
                } => format!("{} {}", winner.letter(), self.pos.format_point(mv).to_lowercase()),
                Outcome::Win { winner, mv: None } => winner.letter().to_string(),
                Outcome::Unknown => "unknown".to_string(),
            }),

            "evaluate" => {
                let color = self.pos.to_play;
                let state = evaluate(&self.pos, color);
                Ok(format!("{} for {color}", state.score))
            }

            "checkhash" => {
                let tt = TranspositionTable::new(self.pos.size);
                let board = Board::from(&self.pos);
                Ok(format!(
                    "\n1D code: {}\n{}2D code: {}",
                    tt.code(&self.pos),
                    board,
                    tt.code_2d(&board)
                ))
            }

            "timelimit" => match args[0].parse::<u64>() {
                Ok(secs) => {
                    self.config.set_time_limit_secs(secs);
                    Ok(String::new())
                }
                Err(_) => Err(GtpError::InvalidArgument("invalid time limit".to_string())),
            },

            "gogui-rules_game_id" => Ok(GAME_ID.to_string()),

            "gogui-rules_board_size" => Ok(self.pos.size.to_string()),

            "gogui-rules_legal_moves" => Ok(self.sorted_moves(&self.pos.legal_moves(self.pos.to_play))),

            "gogui-rules_side_to_move" => Ok(self.pos.to_play.name().to_string()),

            "gogui-rules_board" => {
                let board = Board::from(&self.pos);
                let rows: Vec<String> = (0..board.size)
                    .rev()
                    .map(|row| {
                        (0..board.size)
                            .map(|col| match board.get(row, col) {
                                Some(Color::Black) => 'X',
                                Some(Color::White) => 'O',
                                None => '.',
                            })
                            .collect()
                    })
                    .collect();
                Ok(format!("\n{}", rows.join("\n")))
            }

            "gogui-rules_final_result" => {
                let color = self.pos.to_play;
                if self.pos.has_legal_move(color) {
                    Ok("unknown".to_string())
                } else {
                    Ok(color.opponent().name().to_string())
                }
            }

            "gogui-analyze_commands" => Ok(ANALYZE_COMMANDS.to_string()),

            _ => Err(GtpError::UnknownCommand),
        }
    }

    /// Handle `play`. Illegal moves are a successful response describing why.
    fn play(&mut self, color_arg: &str, vertex: &str) -> String {
        let Some(color) = Color::parse(color_arg) else {
            return format!("illegal move: \"{color_arg}\" wrong color");
        };
        let pt = match self.pos.parse_point(vertex) {
            Ok(pt) => pt,
            Err(err) => return format!("illegal move: \"{color_arg} {vertex}\" {err}"),
        };
        match self.pos.play(pt, color) {
            Ok(()) => {
                debug!(%color, vertex, "move played");
                String::new()
            }
            Err(err) => format!("illegal move: \"{color_arg} {vertex}\" {err}"),
        }
    }

    fn sorted_moves(&self, moves: &[Point]) -> String {
        let mut names: Vec<String> = moves.iter().map(|&pt| self.pos.format_point(pt)).collect();
        names.sort();
        names.join(" ")
    }
}

fn parse_color(arg: &str) -> Result<Color, GtpError> {
    Color::parse(arg).ok_or_else(|| GtpError::InvalidArgument(format!("invalid color {arg}")))
}
