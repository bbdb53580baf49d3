use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::game::Difficulty;
use crate::session::{
    GameMode, Session, DEFAULT_BALL_SIZE, DEFAULT_POINTS, MAX_BALL_SIZE, MAX_POINTS, MIN_BALL_SIZE,
    MIN_POINTS,
};

const DEFAULT_FPS: u32 = 90;
const LOG_FILE: &str = "rustpong.log";

/// Terminal Ping Pong against the computer or a friend.
#[derive(Debug, Parser)]
#[command(name = "rustpong", version, about)]
pub struct Cli {
    /// Points needed to win a match
    #[arg(long, default_value_t = DEFAULT_POINTS,
          value_parser = clap::value_parser!(u32).range(MIN_POINTS as i64..=MAX_POINTS as i64))]
    pub points: u32,

    /// Who plays the right paddle
    #[arg(long, value_enum, default_value_t = GameMode::default())]
    pub mode: GameMode,

    /// Computer opponent strength in single-player mode
    #[arg(long, value_enum, default_value_t = Difficulty::default())]
    pub difficulty: Difficulty,

    /// Starting ball diameter
    #[arg(long, default_value_t = DEFAULT_BALL_SIZE,
          value_parser = clap::value_parser!(u32).range(MIN_BALL_SIZE as i64..=MAX_BALL_SIZE as i64))]
    pub ball_size: u32,

    /// Disable the B/X ball size keys
    #[arg(long)]
    pub fixed_ball_size: bool,

    /// Start with crazy mode on (faster ball, flashing colours)
    #[arg(long)]
    pub crazy: bool,

    /// Directory holding g-img.jpg, pl-img.jpg, collision.mp3 and bg.mp3
    #[arg(long, default_value = ".")]
    pub assets: PathBuf,

    /// Simulation ticks per second
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(10..=240))]
    pub fps: u32,

    /// No sound effects or music
    #[arg(long)]
    pub mute: bool,

    /// Where to write the log [default: <temp dir>/rustpong.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime knobs that are not part of the game itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub assets: PathBuf,
    pub tick_rate: Duration,
    pub mute: bool,
    pub log_file: PathBuf,
}

impl Cli {
    pub fn session(&self) -> Session {
        Session {
            mode: self.mode,
            difficulty: self.difficulty,
            points_to_win: self.points,
            ball_size: self.ball_size,
            ball_size_changes: !self.fixed_ball_size,
            crazy: self.crazy,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            assets: self.assets.clone(),
            tick_rate: Duration::from_secs(1) / self.fps,
            mute: self.mute,
            log_file: self
                .log_file
                .clone()
                .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE)),
        }
    }
}
