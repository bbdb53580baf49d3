use rand::Rng;
use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::court::{draw_field, player_names};
use super::{render_button, GREEN, RED, WHITE, YELLOW};
use crate::app::App;
use crate::game::Side;
use crate::menu::{game_over_layout, Action, Button};
use crate::session::Session;

const SPARKLES: usize = 20;
const SPARKLE: &str = "✦";

/// What the end screen says about the finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub headline: String,
    pub subline: String,
    pub celebrate: bool,
}

impl Verdict {
    pub fn new(session: &Session, winner: Side, left: u32, right: u32) -> Self {
        let score = format!("{left} - {right}");
        if !session.is_single_player() {
            let (left_name, right_name) = player_names(session);
            let name = match winner {
                Side::Left => left_name,
                Side::Right => right_name,
            };
            return Self {
                headline: format!("{} WINS!", name.to_uppercase()),
                subline: score,
                celebrate: true,
            };
        }
        match winner {
            Side::Left => Self {
                headline: "VICTORY!".into(),
                subline: format!("You beat the computer {score}"),
                celebrate: true,
            },
            Side::Right => Self {
                headline: "GAME OVER".into(),
                subline: format!("TRY AGAIN! {score}"),
                celebrate: false,
            },
        }
    }
}

pub fn render_game_over(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut rng = rand::thread_rng();
    let mut field = draw_field(app, area, &mut rng);
    field.dim(0.35);
    frame.render_widget(&field, area);

    let winner = app.game.winner().unwrap_or(Side::Right);
    let verdict = Verdict::new(
        &app.session,
        winner,
        app.game.score(Side::Left),
        app.game.score(Side::Right),
    );

    if verdict.celebrate {
        sparkle(frame.buffer_mut(), area, &mut rng);
    }

    let layout = game_over_layout(area);
    app.buttons.replace(layout.buttons, Action::Restart);

    let accent = if verdict.celebrate { YELLOW } else { RED };
    let headline_area = centered(layout.headline, verdict.headline.chars().count() as u16 + 8);
    frame.render_widget(Clear, headline_area);
    frame.render_widget(
        Paragraph::new(Line::styled(
            verdict.headline.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(accent)),
        ),
        headline_area,
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            verdict.subline.clone(),
            Style::default().fg(WHITE).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        layout.subline,
    );

    for button in app.buttons.buttons() {
        let hovered = app.pointer.position.is_some_and(|p| button.rect.contains(p));
        let focused = app.buttons.is_focused(button.action);
        render_button(frame, button, button_color(button), hovered, focused);
    }
}

fn button_color(button: &Button) -> Color {
    match button.action {
        Action::Quit => RED,
        _ => GREEN,
    }
}

/// Yellow stars at fresh random spots every frame.
fn sparkle<R: Rng + ?Sized>(buf: &mut Buffer, area: Rect, rng: &mut R) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    for _ in 0..SPARKLES {
        let x = area.x + rng.gen_range(0..area.width);
        let y = area.y + rng.gen_range(0..area.height);
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(SPARKLE).set_fg(YELLOW);
        }
    }
}

fn centered(row: Rect, width: u16) -> Rect {
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    rect
}
