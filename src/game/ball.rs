use std::f32::consts::PI;

use rand::Rng;

use super::{Court, Paddle, Side};

pub const BALL_BASE_SPEED: f32 = 5.0;
pub const BALL_MAX_SPEED: f32 = 12.0;
/// Speed multiplier applied on every paddle hit.
pub const SPEED_GROWTH: f32 = 1.05;
/// Steepest rebound, reached when the ball clips a paddle's end (75°).
pub const MAX_BOUNCE_ANGLE: f32 = 5.0 * PI / 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Centre of the ball.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub dx: f32,
    pub dy: f32,
    pub speed: f32,
}

impl Ball {
    pub fn new<R: Rng + ?Sized>(court: &Court, size: u32, rng: &mut R) -> Self {
        let mut ball = Self {
            x: 0.0,
            y: 0.0,
            size: size as f32,
            dx: BALL_BASE_SPEED,
            dy: BALL_BASE_SPEED,
            speed: BALL_BASE_SPEED,
        };
        ball.reset(court, size, rng);
        ball
    }

    pub fn left(&self) -> f32 {
        self.x - self.size / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.size / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.size / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y
    }

    /// Moves one tick and bounces off the top and bottom walls. Returns the
    /// side that won the point if the ball reached a goal line.
    pub fn advance(&mut self, court: &Court, speed_scale: f32) -> Option<Side> {
        self.x += self.dx * speed_scale;
        self.y += self.dy * speed_scale;

        // Always point away from the wall so a ball that sank past the edge
        // doesn't flip back and forth.
        if self.top() <= 0.0 {
            self.dy = self.dy.abs();
        } else if self.bottom() >= court.height {
            self.dy = -self.dy.abs();
        }

        if self.left() <= 0.0 {
            return Some(Side::Right);
        }
        if self.right() >= court.width {
            return Some(Side::Left);
        }
        None
    }

    /// Back to the centre with base speed, a random diagonal and `size`.
    pub fn reset<R: Rng + ?Sized>(&mut self, court: &Court, size: u32, rng: &mut R) {
        let (cx, cy) = court.center();
        self.x = cx;
        self.y = cy;
        self.dx = random_sign(rng) * BALL_BASE_SPEED;
        self.dy = random_sign(rng) * BALL_BASE_SPEED;
        self.speed = BALL_BASE_SPEED;
        self.size = size as f32;
    }

    /// Changes the diameter in place, keeping the centre.
    pub fn resize(&mut self, size: u32) {
        self.size = size as f32;
    }

    /// Strict overlap: touching edges don't count.
    pub fn overlaps(&self, paddle: &Paddle) -> bool {
        self.left() < paddle.right()
            && self.right() > paddle.left()
            && self.top() < paddle.bottom()
            && self.bottom() > paddle.top()
    }

    /// Bounces off `paddle` if the two overlap. Where the ball strikes
    /// relative to the paddle's centre picks the rebound angle, and every hit
    /// speeds the ball up until `BALL_MAX_SPEED`.
    pub fn collide(&mut self, paddle: &Paddle) -> bool {
        if !self.overlaps(paddle) {
            return false;
        }

        let relative_intersect =
            ((paddle.center_y() - self.center_y()) / (paddle.height / 2.0)).clamp(-1.0, 1.0);
        let bounce_angle = relative_intersect * MAX_BOUNCE_ANGLE;

        self.speed = (self.speed * SPEED_GROWTH).min(BALL_MAX_SPEED);
        self.dx = -self.dx;
        self.dy = -self.speed * bounce_angle.sin();
        true
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball {
            x,
            y,
            size: 20.0,
            dx,
            dy,
            speed: BALL_BASE_SPEED,
        }
    }

    #[test]
    fn new_ball_sits_in_the_centre() {
        let court = Court::STANDARD;
        let mut rng = StdRng::seed_from_u64(7);
        let ball = Ball::new(&court, 20, &mut rng);
        assert_eq!((ball.x, ball.y), court.center());
        assert_eq!(ball.size, 20.0);
    }

    #[test]
    fn reset_restores_centre_speed_and_size() {
        let court = Court::STANDARD;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            let mut ball = ball_at(13.0, 590.0, -7.0, 3.2);
            ball.speed = 11.0;
            ball.size = 40.0;
            ball.reset(&court, 10, &mut rng);
            assert_eq!((ball.x, ball.y), court.center());
            assert_eq!(ball.speed, BALL_BASE_SPEED);
            assert_eq!(ball.dx.abs(), BALL_BASE_SPEED);
            assert_eq!(ball.dy.abs(), BALL_BASE_SPEED);
            assert_eq!(ball.size, 10.0);
        }
    }

    #[test]
    fn reset_picks_every_diagonal_eventually() {
        let court = Court::STANDARD;
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();
        let mut ball = ball_at(0.0, 0.0, 0.0, 0.0);
        for _ in 0..200 {
            ball.reset(&court, 20, &mut rng);
            seen.insert((ball.dx > 0.0, ball.dy > 0.0));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn bounces_off_top_and_bottom() {
        let court = Court::STANDARD;
        let mut ball = ball_at(400.0, 12.0, 5.0, -5.0);
        assert_eq!(ball.advance(&court, 1.0), None);
        assert_eq!(ball.dy, 5.0);

        let mut ball = ball_at(400.0, 588.0, 5.0, 5.0);
        assert_eq!(ball.advance(&court, 1.0), None);
        assert_eq!(ball.dy, -5.0);
    }

    #[test]
    fn ball_past_the_wall_keeps_heading_back_in() {
        let court = Court::STANDARD;
        let mut ball = ball_at(400.0, 3.0, 5.0, 5.0);
        ball.advance(&court, 1.0);
        assert!(ball.dy > 0.0);
    }

    #[test]
    fn crazy_scale_speeds_up_travel() {
        let court = Court::STANDARD;
        let mut ball = ball_at(400.0, 300.0, 5.0, -5.0);
        ball.advance(&court, 1.5);
        assert_eq!((ball.x, ball.y), (407.5, 292.5));
    }

    #[test]
    fn exiting_left_scores_for_the_right_side() {
        let court = Court::STANDARD;
        let mut ball = ball_at(14.0, 300.0, -5.0, 5.0);
        assert_eq!(ball.advance(&court, 1.0), Some(Side::Right));
    }

    #[test]
    fn exiting_right_scores_for_the_left_side() {
        let court = Court::STANDARD;
        let mut ball = ball_at(786.0, 300.0, 5.0, 5.0);
        assert_eq!(ball.advance(&court, 1.0), Some(Side::Left));
    }

    #[test]
    fn centre_hit_reverses_and_flattens() {
        let court = Court::STANDARD;
        let (cx, cy) = court.center();
        let mut ball = ball_at(cx, cy, 5.0, 5.0);
        let paddle = Paddle::new(cx - 7.5, cy - 50.0);

        assert!(ball.collide(&paddle));
        assert_eq!(ball.dx, -5.0);
        assert!((ball.speed - 5.25).abs() < 1e-5);
        assert!(ball.dy.abs() < 1e-5);
    }

    #[test]
    fn edge_hits_rebound_steeply() {
        // Ball above the paddle centre goes up, below goes down.
        let paddle = Paddle::new(20.0, 250.0);
        let mut high = ball_at(30.0, 250.0, -5.0, 5.0);
        assert!(high.collide(&paddle));
        let expected = -high.speed * MAX_BOUNCE_ANGLE.sin();
        assert!((high.dy - expected).abs() < 1e-4);
        assert!(high.dy < 0.0);

        let mut low = ball_at(30.0, 350.0, -5.0, -5.0);
        assert!(low.collide(&paddle));
        assert!(low.dy > 0.0);
    }

    #[test]
    fn offset_is_clamped_for_balls_hanging_off_the_end() {
        let paddle = Paddle::new(20.0, 250.0);
        let mut ball = ball_at(30.0, 245.0, -5.0, 0.0);
        ball.size = 50.0;
        assert!(ball.collide(&paddle));
        let steepest = -ball.speed * MAX_BOUNCE_ANGLE.sin();
        assert!((ball.dy - steepest).abs() < 1e-4);
    }

    #[test]
    fn no_overlap_is_a_no_op() {
        let paddle = Paddle::new(20.0, 250.0);
        let mut ball = ball_at(400.0, 300.0, -5.0, 5.0);
        let before = ball.clone();
        assert!(!ball.collide(&paddle));
        assert_eq!(ball, before);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let paddle = Paddle::new(20.0, 250.0);
        // Ball's left edge exactly on the paddle's right edge.
        let ball = ball_at(45.0, 300.0, -5.0, 0.0);
        assert!(!ball.overlaps(&paddle));
    }

    proptest! {
        #[test]
        fn speed_never_passes_the_cap(hits in 1usize..200, offset in -60.0f32..60.0) {
            let paddle = Paddle::new(20.0, 250.0);
            let mut ball = ball_at(30.0, 300.0 + offset, -5.0, 5.0);
            for _ in 0..hits {
                ball.collide(&paddle);
                prop_assert!(ball.speed <= BALL_MAX_SPEED);
                prop_assert!(ball.dy.abs() <= BALL_MAX_SPEED);
            }
        }

        #[test]
        fn scoring_signal_matches_goal_lines(
            x in -40.0f32..840.0,
            y in 20.0f32..580.0,
            dx in -12.0f32..12.0,
            dy in -12.0f32..12.0,
        ) {
            let court = Court::STANDARD;
            let mut ball = ball_at(x, y, dx, dy);
            let signal = ball.advance(&court, 1.0);
            let expected = if ball.left() <= 0.0 {
                Some(Side::Right)
            } else if ball.right() >= court.width {
                Some(Side::Left)
            } else {
                None
            };
            prop_assert_eq!(signal, expected);
        }
    }
}
