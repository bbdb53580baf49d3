use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::canvas::Canvas;
use super::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
use crate::app::App;
use crate::game::{Match, Side};
use crate::session::Session;

const CRAZY_COLORS: [Color; 4] = [RED, GREEN, BLUE, YELLOW];

pub fn render_court(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BLUE))
        .title(" 🏓 Ping Pong ")
        .title_style(Style::default().fg(YELLOW).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(&app.session, &app.game)), chunks[0]);

    let field = draw_field(app, chunks[1], &mut rand::thread_rng());
    frame.render_widget(&field, chunks[1]);

    frame.render_widget(Paragraph::new(help_line(&app.session)), chunks[2]);
}

/// Court backdrop, paddles and ball scaled into `area`.
pub fn draw_field<R: Rng + ?Sized>(app: &mut App, area: Rect, rng: &mut R) -> Canvas {
    let width = area.width;
    let height = area.height * 2;
    if width == 0 || height == 0 {
        return Canvas::new(0, 0, BLACK);
    }
    let mut canvas = Canvas::from_image(app.assets.court.fit(width as u32, height as u32));

    let game = &app.game;
    let court = game.court();
    let sx = width as f32 / court.width;
    let sy = height as f32 / court.height;

    for (side, color) in [(Side::Left, GREEN), (Side::Right, RED)] {
        let paddle = game.paddle(side);
        canvas.fill_rect(
            paddle.x * sx,
            paddle.y * sy,
            paddle.width * sx,
            paddle.height * sy,
            color,
        );
    }

    let ball = &game.ball;
    let color = if app.session.crazy {
        *CRAZY_COLORS.choose(rng).unwrap_or(&RED)
    } else {
        RED
    };
    let (cx, cy) = (ball.x * sx, ball.y * sy);
    let (rx, ry) = (ball.size / 2.0 * sx, ball.size / 2.0 * sy);
    if rx >= 2.0 && ry >= 2.0 {
        canvas.fill_ellipse(cx, cy, rx, ry, WHITE);
        canvas.fill_ellipse(cx, cy, rx - 1.0, ry - 1.0, color);
    } else {
        canvas.fill_ellipse(cx, cy, rx, ry, color);
    }

    canvas
}

fn status_line(session: &Session, game: &Match) -> Line<'static> {
    let (left_name, right_name) = player_names(session);
    let mut spans = vec![
        Span::styled(
            format!(" {}: {} ", left_name, game.score(Side::Left)),
            Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}: {} ", right_name, game.score(Side::Right)),
            Style::default().fg(RED).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("First to {} ", session.points_to_win),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if session.is_single_player() {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            session.difficulty.label(),
            Style::default().fg(Color::Gray),
        ));
    }
    if session.crazy {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            "CRAZY",
            Style::default().fg(YELLOW).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn help_line(session: &Session) -> Line<'static> {
    let key = Style::default().fg(Color::Rgb(80, 200, 255));
    let text = Style::default().fg(Color::Gray);
    let mut spans = vec![
        Span::styled(" W/S", key),
        Span::styled(" move", text),
    ];
    if !session.is_single_player() {
        spans.push(Span::styled("  ↑/↓", key));
        spans.push(Span::styled(" right paddle", text));
    }
    if session.ball_size_changes {
        spans.push(Span::styled("  B/X", key));
        spans.push(Span::styled(" ball size", text));
    }
    spans.push(Span::styled("  Ctrl+C", key));
    spans.push(Span::styled(" quit", text));
    Line::from(spans)
}

pub fn player_names(session: &Session) -> (&'static str, &'static str) {
    if session.is_single_player() {
        ("You", "CPU")
    } else {
        ("Player 1", "Player 2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Action;
    use crate::ui::tests::{app, draw, text};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::game::Court;
    use std::time::Instant;

    /// Court units per canvas pixel.
    fn pixel_scale(court: &Court, area: Rect) -> (f32, f32) {
        (
            court.width / area.width as f32,
            court.height / (area.height * 2) as f32,
        )
    }

    fn playing() -> App {
        let mut app = app();
        app.perform(Action::Start, Instant::now());
        app
    }

    #[test]
    fn paddles_are_drawn_in_their_colours() {
        let mut app = playing();
        let area = Rect::new(0, 0, 80, 30);
        let canvas = draw_field(&mut app, area, &mut StdRng::seed_from_u64(1));
        assert!(canvas.get(79, 59).is_some());
        assert!(canvas.get(80, 0).is_none());
        assert!(canvas.get(0, 60).is_none());

        let (sx, sy) = pixel_scale(app.game.court(), area);
        let left = app.game.paddle(Side::Left);
        let right = app.game.paddle(Side::Right);
        let px = |x: f32, y: f32| canvas.get((x / sx) as u16, (y / sy) as u16);
        assert_eq!(px(left.x + 7.0, left.center_y()), Some(GREEN));
        assert_eq!(px(right.x + 7.0, right.center_y()), Some(RED));
    }

    #[test]
    fn large_ball_gets_a_white_outline() {
        let mut app = playing();
        app.game.ball.size = 50.0;
        let area = Rect::new(0, 0, 160, 60);
        let canvas = draw_field(&mut app, area, &mut StdRng::seed_from_u64(1));
        let (sx, sy) = pixel_scale(app.game.court(), area);
        let ball = &app.game.ball;
        let centre = canvas.get((ball.x / sx) as u16, (ball.y / sy) as u16);
        assert_eq!(centre, Some(RED));
        let rim = canvas.get((ball.x / sx) as u16, ((ball.y - ball.size / 2.0) / sy) as u16);
        assert_eq!(rim, Some(WHITE));
    }

    #[test]
    fn crazy_ball_takes_a_palette_colour() {
        let mut app = playing();
        app.session.crazy = true;
        let area = Rect::new(0, 0, 80, 30);
        let canvas = draw_field(&mut app, area, &mut StdRng::seed_from_u64(9));
        let (sx, sy) = pixel_scale(app.game.court(), area);
        let ball = &app.game.ball;
        let centre = canvas.get((ball.x / sx) as u16, (ball.y / sy) as u16);
        assert!(centre.is_some_and(|c| CRAZY_COLORS.contains(&c)));
    }

    #[test]
    fn playing_screen_shows_scores_and_help() {
        let mut app = playing();
        app.game.right.score = 3;
        let screen = text(&draw(&mut app, 100, 30));
        assert!(screen.contains("Ping Pong"));
        assert!(screen.contains("You: 0"));
        assert!(screen.contains("CPU: 3"));
        assert!(screen.contains("First to 5"));
        assert!(screen.contains("W/S move"));
        assert!(!screen.contains("right paddle"));
    }
}
