use clap::ValueEnum;

use crate::game::Difficulty;

pub const MIN_POINTS: u32 = 1;
pub const MAX_POINTS: u32 = 10;
pub const DEFAULT_POINTS: u32 = 5;

pub const MIN_BALL_SIZE: u32 = 10;
pub const MAX_BALL_SIZE: u32 = 50;
pub const DEFAULT_BALL_SIZE: u32 = 20;

/// Ball travel multiplier while crazy mode is on.
pub const CRAZY_SPEED_SCALE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GameMode {
    /// Left paddle against the computer
    #[default]
    #[value(name = "single")]
    SinglePlayer,
    /// Two players sharing one keyboard
    #[value(name = "multi")]
    MultiPlayer,
}

impl GameMode {
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::SinglePlayer => "1 PLAYER",
            GameMode::MultiPlayer => "2 PLAYERS",
        }
    }
}

/// Everything the menu lets the player choose. Lives for one run of the
/// program and is handed to the match on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub points_to_win: u32,
    pub ball_size: u32,
    pub ball_size_changes: bool,
    pub crazy: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            mode: GameMode::SinglePlayer,
            difficulty: Difficulty::Easy,
            points_to_win: DEFAULT_POINTS,
            ball_size: DEFAULT_BALL_SIZE,
            ball_size_changes: true,
            crazy: false,
        }
    }
}

impl Session {
    /// Returns true if the target actually moved.
    pub fn increase_points(&mut self) -> bool {
        let before = self.points_to_win;
        self.points_to_win = (self.points_to_win + 1).min(MAX_POINTS);
        self.points_to_win != before
    }

    pub fn decrease_points(&mut self) -> bool {
        let before = self.points_to_win;
        self.points_to_win = self.points_to_win.saturating_sub(1).max(MIN_POINTS);
        self.points_to_win != before
    }

    /// Doubles the ball, capped at `MAX_BALL_SIZE`.
    pub fn grow_ball(&mut self) -> bool {
        if !self.ball_size_changes {
            return false;
        }
        let before = self.ball_size;
        self.ball_size = (self.ball_size * 2).min(MAX_BALL_SIZE);
        self.ball_size != before
    }

    /// Halves the ball, floored at `MIN_BALL_SIZE`.
    pub fn shrink_ball(&mut self) -> bool {
        if !self.ball_size_changes {
            return false;
        }
        let before = self.ball_size;
        self.ball_size = (self.ball_size / 2).max(MIN_BALL_SIZE);
        self.ball_size != before
    }

    pub fn toggle_crazy(&mut self) {
        self.crazy = !self.crazy;
    }

    pub fn speed_scale(&self) -> f32 {
        if self.crazy {
            CRAZY_SPEED_SCALE
        } else {
            1.0
        }
    }

    pub fn is_single_player(&self) -> bool {
        self.mode == GameMode::SinglePlayer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_stay_within_bounds() {
        let mut session = Session::default();
        for _ in 0..20 {
            session.increase_points();
        }
        assert_eq!(session.points_to_win, MAX_POINTS);
        assert!(!session.increase_points());

        for _ in 0..20 {
            session.decrease_points();
        }
        assert_eq!(session.points_to_win, MIN_POINTS);
        assert!(!session.decrease_points());
    }

    #[test]
    fn ball_size_doubles_and_halves_within_bounds() {
        let mut session = Session::default();
        assert!(session.grow_ball());
        assert_eq!(session.ball_size, 40);
        assert!(session.grow_ball());
        assert_eq!(session.ball_size, MAX_BALL_SIZE);
        assert!(!session.grow_ball());

        assert!(session.shrink_ball());
        assert_eq!(session.ball_size, 25);
        assert!(session.shrink_ball());
        assert_eq!(session.ball_size, 12);
        assert!(session.shrink_ball());
        assert_eq!(session.ball_size, MIN_BALL_SIZE);
        assert!(!session.shrink_ball());
    }

    #[test]
    fn ball_size_locked_when_changes_disabled() {
        let mut session = Session {
            ball_size_changes: false,
            ..Session::default()
        };
        assert!(!session.grow_ball());
        assert!(!session.shrink_ball());
        assert_eq!(session.ball_size, DEFAULT_BALL_SIZE);
    }

    #[test]
    fn crazy_mode_scales_ball_travel() {
        let mut session = Session::default();
        assert_eq!(session.speed_scale(), 1.0);
        session.toggle_crazy();
        assert_eq!(session.speed_scale(), CRAZY_SPEED_SCALE);
    }
}
