use rand::Rng;

use super::{Ball, Court, Difficulty, Side};

pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
pub const PADDLE_SPEED: f32 = 5.0;
/// Gap between a paddle and its own goal line.
const GOAL_GAP: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub score: u32,
}

impl Paddle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            score: 0,
        }
    }

    /// Vertically centred paddle in front of `side`'s goal.
    pub fn for_side(side: Side, court: &Court) -> Self {
        let x = match side {
            Side::Left => GOAL_GAP,
            Side::Right => court.width - GOAL_GAP - PADDLE_WIDTH,
        };
        Self::new(x, court.height / 2.0 - PADDLE_HEIGHT / 2.0)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Keyboard movement: one `speed` step per held direction. Holding both
    /// cancels out.
    pub fn steer(&mut self, up: bool, down: bool, court: &Court) {
        let mut dy = 0.0;
        if up && self.top() > 0.0 {
            dy -= self.speed;
        }
        if down && self.bottom() < court.height {
            dy += self.speed;
        }
        self.shift(dy, court);
    }

    /// Computer movement for the given difficulty.
    pub fn ai_move<R: Rng + ?Sized>(
        &mut self,
        ball: &Ball,
        difficulty: Difficulty,
        court: &Court,
        rng: &mut R,
    ) {
        let dy = difficulty.displacement(ball, self, court, rng);
        self.shift(dy, court);
    }

    /// Moves by `dy`, clamped so the paddle never leaves the court.
    pub fn shift(&mut self, dy: f32, court: &Court) {
        self.y = (self.y + dy).min(court.height - self.height).max(0.0);
    }
}
