//! Computer opponent.
//!
//! Each difficulty is a plain function of the ball and paddle that yields how
//! far the paddle should move this tick.

use clap::ValueEnum;
use rand::Rng;

use super::{Ball, Court, Paddle};

/// Chance per tick that the easy opponent hesitates.
const EASY_HESITATION: f64 = 0.3;
const EASY_SPEED_FACTOR: f32 = 0.7;
const MODERATE_SPEED_FACTOR: f32 = 0.9;
const HARD_SPEED_FACTOR: f32 = 1.1;
/// The hard opponent never aims closer than this to the top or bottom wall.
pub const PREDICTION_MARGIN: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Moderate => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => EASY_SPEED_FACTOR,
            Difficulty::Moderate => MODERATE_SPEED_FACTOR,
            Difficulty::Hard => HARD_SPEED_FACTOR,
        }
    }

    /// Signed vertical displacement for `paddle` this tick.
    pub fn displacement<R: Rng + ?Sized>(
        &self,
        ball: &Ball,
        paddle: &Paddle,
        court: &Court,
        rng: &mut R,
    ) -> f32 {
        match self {
            Difficulty::Easy => easy(ball, paddle, court, rng),
            Difficulty::Moderate => moderate(ball, paddle, court),
            Difficulty::Hard => hard(ball, paddle, court),
        }
    }
}

/// Chases the ball's current height, but hesitates now and then.
fn easy<R: Rng + ?Sized>(ball: &Ball, paddle: &Paddle, court: &Court, rng: &mut R) -> f32 {
    if rng.gen_bool(EASY_HESITATION) {
        return 0.0;
    }
    track(paddle, ball.center_y(), court, Difficulty::Easy.speed_factor())
}

fn moderate(ball: &Ball, paddle: &Paddle, court: &Court) -> f32 {
    track(paddle, ball.center_y(), court, Difficulty::Moderate.speed_factor())
}

/// Aims for where the ball will cross the paddle's plane.
fn hard(ball: &Ball, paddle: &Paddle, court: &Court) -> f32 {
    let target = predict_intercept(ball, paddle, court);
    track(paddle, target, court, Difficulty::Hard.speed_factor())
}

/// Linear extrapolation of the ball's height at the paddle, kept inside
/// `[PREDICTION_MARGIN, court.height - PREDICTION_MARGIN]`.
pub fn predict_intercept(ball: &Ball, paddle: &Paddle, court: &Court) -> f32 {
    let predicted = ball.center_y() + ball.dx * (paddle.left() - ball.right()) / ball.speed;
    predicted
        .min(court.height - PREDICTION_MARGIN)
        .max(PREDICTION_MARGIN)
}

fn track(paddle: &Paddle, target: f32, court: &Court, factor: f32) -> f32 {
    let step = paddle.speed * factor;
    if target < paddle.center_y() && paddle.top() > 0.0 {
        -step
    } else if target > paddle.center_y() && paddle.bottom() < court.height {
        step
    } else {
        0.0
    }
}
