pub mod canvas;
pub mod court;
pub mod game_over;
pub mod menu;

use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::Phase;
use crate::menu::Button;

pub const GREEN: Color = Color::Rgb(50, 255, 50);
pub const RED: Color = Color::Rgb(255, 50, 50);
pub const BLUE: Color = Color::Rgb(50, 50, 255);
pub const YELLOW: Color = Color::Rgb(255, 255, 50);
pub const PURPLE: Color = Color::Rgb(150, 50, 255);
pub const ORANGE: Color = Color::Rgb(255, 150, 50);
pub const WHITE: Color = Color::Rgb(255, 255, 255);
pub const BLACK: Color = Color::Rgb(0, 0, 0);

pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    let area = frame.area();
    match app.game.phase() {
        Phase::Menu => menu::render_menu(frame, area, app, now),
        Phase::Playing => {
            app.buttons.clear();
            court::render_court(frame, area, app);
        }
        Phase::GameOver => game_over::render_game_over(frame, area, app),
    }
}

/// Filled, bordered button. The hovered button is lit up, the selected
/// option gets a yellow border and keyboard focus a double one.
pub fn render_button(frame: &mut Frame, button: &Button, color: Color, hovered: bool, focused: bool) {
    let fill = if hovered { blend(color, WHITE, 0.35) } else { color };
    let border_color = if button.selected {
        YELLOW
    } else if focused {
        WHITE
    } else {
        blend(color, BLACK, 0.5)
    };
    let border_type = if focused {
        BorderType::Double
    } else {
        BorderType::Rounded
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color).bg(fill))
        .style(Style::default().bg(fill));
    let label = Paragraph::new(button.label.as_str())
        .style(
            Style::default()
                .fg(WHITE)
                .bg(fill)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(label, button.rect);
}

/// Linear mix of two RGB colours; `t = 0` is `a`.
pub fn blend(a: Color, b: Color, t: f32) -> Color {
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => a,
    }
}
