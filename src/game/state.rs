//! Match state machine: Menu -> Playing -> GameOver -> Menu.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{Ball, Court, Paddle, Side};
use crate::session::{GameMode, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// Held movement keys for one tick. The right-hand pair is ignored when the
/// computer plays that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit(Side),
    Scored { scorer: Side, left: u32, right: u32 },
    MatchOver { winner: Side },
}

pub struct Match {
    phase: Phase,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    court: Court,
    rng: StdRng,
}

impl Match {
    pub fn new(session: &Session) -> Self {
        Self::with_rng(session, StdRng::from_entropy())
    }

    /// Seeded constructor so AI hesitation and serve directions repeat.
    pub fn with_rng(session: &Session, mut rng: StdRng) -> Self {
        let court = Court::STANDARD;
        let ball = Ball::new(&court, session.ball_size, &mut rng);
        Self {
            phase: Phase::Menu,
            left: Paddle::for_side(Side::Left, &court),
            right: Paddle::for_side(Side::Right, &court),
            ball,
            court,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn court(&self) -> &Court {
        &self.court
    }

    pub fn score(&self, side: Side) -> u32 {
        self.paddle(side).score
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Side with the higher score once the match is over.
    pub fn winner(&self) -> Option<Side> {
        if self.phase != Phase::GameOver {
            return None;
        }
        if self.left.score > self.right.score {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Menu -> Playing with fresh paddles and ball.
    pub fn start(&mut self, session: &Session) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.respawn(session);
        self.phase = Phase::Playing;
        tracing::info!(
            mode = ?session.mode,
            difficulty = ?session.difficulty,
            points_to_win = session.points_to_win,
            crazy = session.crazy,
            "match started"
        );
        true
    }

    /// GameOver -> Menu, wiping scores.
    pub fn restart(&mut self, session: &Session) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.respawn(session);
        self.phase = Phase::Menu;
        tracing::info!("back to menu");
        true
    }

    pub fn resize_ball(&mut self, size: u32) {
        self.ball.resize(size);
    }

    fn respawn(&mut self, session: &Session) {
        self.left = Paddle::for_side(Side::Left, &self.court);
        self.right = Paddle::for_side(Side::Right, &self.court);
        self.ball = Ball::new(&self.court, session.ball_size, &mut self.rng);
    }

    /// One simulation step. Does nothing outside `Phase::Playing`.
    pub fn tick(&mut self, session: &Session, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }

        self.left.steer(input.left_up, input.left_down, &self.court);
        match session.mode {
            GameMode::SinglePlayer => self.right.ai_move(
                &self.ball,
                session.difficulty,
                &self.court,
                &mut self.rng,
            ),
            GameMode::MultiPlayer => {
                self.right
                    .steer(input.right_up, input.right_down, &self.court)
            }
        }

        if let Some(scorer) = self.ball.advance(&self.court, session.speed_scale()) {
            let paddle = match scorer {
                Side::Left => &mut self.left,
                Side::Right => &mut self.right,
            };
            paddle.score += 1;
            let reached = paddle.score >= session.points_to_win;

            events.push(GameEvent::Scored {
                scorer,
                left: self.left.score,
                right: self.right.score,
            });
            self.ball.reset(&self.court, session.ball_size, &mut self.rng);

            if reached {
                self.phase = Phase::GameOver;
                events.push(GameEvent::MatchOver { winner: scorer });
                return events;
            }
        }

        // Only the paddle the ball is heading for can be hit, so a ball still
        // overlapping the paddle it just left is not bounced back.
        let target = if self.ball.dx < 0.0 { Side::Left } else { Side::Right };
        let paddle = match target {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        if self.ball.collide(paddle) {
            events.push(GameEvent::PaddleHit(target));
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ball::BALL_BASE_SPEED;
    use crate::game::Difficulty;

    fn seeded(session: &Session) -> Match {
        Match::with_rng(session, StdRng::seed_from_u64(2024))
    }

    fn multi() -> Session {
        Session {
            mode: GameMode::MultiPlayer,
            ..Session::default()
        }
    }

    /// Puts the ball one step from the left goal line, moving left, away
    /// from the left paddle.
    fn about_to_exit_left(m: &mut Match) {
        m.ball.x = 6.0;
        m.ball.y = 550.0;
        m.ball.dx = -BALL_BASE_SPEED;
        m.ball.dy = 0.0;
    }

    #[test]
    fn starts_in_menu_and_ignores_ticks() {
        let session = Session::default();
        let mut m = seeded(&session);
        assert_eq!(m.phase(), Phase::Menu);
        let before = m.ball.clone();
        assert!(m.tick(&session, &TickInput::default()).is_empty());
        assert_eq!(m.ball, before);
    }

    #[test]
    fn transitions_only_from_their_source_phase() {
        let session = Session::default();
        let mut m = seeded(&session);
        assert!(!m.restart(&session));
        assert!(m.start(&session));
        assert_eq!(m.phase(), Phase::Playing);
        assert!(!m.start(&session));
        assert!(!m.restart(&session));
    }

    #[test]
    fn start_uses_configured_ball_size() {
        let session = Session {
            ball_size: 40,
            ..Session::default()
        };
        let mut m = seeded(&Session::default());
        m.start(&session);
        assert_eq!(m.ball.size, 40.0);
    }

    #[test]
    fn five_exits_left_end_the_match_for_the_right_side() {
        let session = Session {
            points_to_win: 5,
            ..multi()
        };
        let mut m = seeded(&session);
        m.start(&session);

        for round in 1..=5 {
            about_to_exit_left(&mut m);
            let events = m.tick(&session, &TickInput::default());
            assert_eq!(
                events[0],
                GameEvent::Scored {
                    scorer: Side::Right,
                    left: 0,
                    right: round
                }
            );
            if round < 5 {
                assert_eq!(m.phase(), Phase::Playing);
                assert_eq!(m.winner(), None);
            }
        }

        assert_eq!(m.phase(), Phase::GameOver);
        assert_eq!(m.score(Side::Right), 5);
        assert_eq!(m.score(Side::Left), 0);
        assert_eq!(m.winner(), Some(Side::Right));
    }

    #[test]
    fn ball_is_served_from_centre_after_a_point() {
        let session = multi();
        let mut m = seeded(&session);
        m.start(&session);
        about_to_exit_left(&mut m);
        m.tick(&session, &TickInput::default());
        assert_eq!((m.ball.x, m.ball.y), m.court().center());
        assert_eq!(m.ball.speed, BALL_BASE_SPEED);
    }

    #[test]
    fn game_over_freezes_the_board() {
        let session = Session {
            points_to_win: 1,
            ..multi()
        };
        let mut m = seeded(&session);
        m.start(&session);
        about_to_exit_left(&mut m);
        let events = m.tick(&session, &TickInput::default());
        assert_eq!(
            events.last(),
            Some(&GameEvent::MatchOver {
                winner: Side::Right
            })
        );

        let before = m.ball.clone();
        m.tick(&session, &TickInput::default());
        assert_eq!(m.ball, before);
    }

    #[test]
    fn restart_resets_scores_and_returns_to_menu() {
        let session = Session {
            points_to_win: 1,
            ..multi()
        };
        let mut m = seeded(&session);
        m.start(&session);
        about_to_exit_left(&mut m);
        m.tick(&session, &TickInput::default());

        assert!(m.restart(&session));
        assert_eq!(m.phase(), Phase::Menu);
        assert_eq!(m.score(Side::Left), 0);
        assert_eq!(m.score(Side::Right), 0);
        assert!(m.start(&session));
    }

    #[test]
    fn players_steer_both_paddles_in_multiplayer() {
        let session = multi();
        let mut m = seeded(&session);
        m.start(&session);
        let left_y = m.left.y;
        let right_y = m.right.y;
        m.tick(
            &session,
            &TickInput {
                left_up: true,
                right_down: true,
                ..TickInput::default()
            },
        );
        assert_eq!(m.left.y, left_y - m.left.speed);
        assert_eq!(m.right.y, right_y + m.right.speed);
    }

    #[test]
    fn computer_ignores_right_keys_in_single_player() {
        let session = Session {
            difficulty: Difficulty::Moderate,
            ..Session::default()
        };
        let mut m = seeded(&session);
        m.start(&session);
        // Ball level with the right paddle: moderate AI holds still.
        m.ball.y = m.right.center_y();
        m.ball.dy = 0.0;
        let right_y = m.right.y;
        m.tick(
            &session,
            &TickInput {
                right_down: true,
                ..TickInput::default()
            },
        );
        assert_eq!(m.right.y, right_y);
    }

    #[test]
    fn paddle_hit_is_reported() {
        let session = multi();
        let mut m = seeded(&session);
        m.start(&session);
        m.ball.x = m.left.right() + 2.0;
        m.ball.y = m.left.center_y();
        m.ball.dx = -BALL_BASE_SPEED;
        m.ball.dy = 0.0;

        let events = m.tick(&session, &TickInput::default());
        assert_eq!(events, vec![GameEvent::PaddleHit(Side::Left)]);
        assert_eq!(m.ball.dx, BALL_BASE_SPEED);

        // Still overlapping next tick, but now moving away: no second hit.
        let events = m.tick(&session, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(m.ball.dx, BALL_BASE_SPEED);
    }
}
