pub mod ai;
pub mod ball;
pub mod paddle;
pub mod state;

pub use ai::Difficulty;
pub use ball::Ball;
pub use paddle::Paddle;
pub use state::{GameEvent, Match, Phase, TickInput};

/// Playing field in simulation units. Rendering scales it to whatever the
/// terminal gives us.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub width: f32,
    pub height: f32,
}

impl Court {
    pub const STANDARD: Court = Court {
        width: 800.0,
        height: 600.0,
    };

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}
