use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::*;

use super::canvas::Canvas;
use super::{blend, render_button, GREEN, ORANGE, PURPLE, RED, WHITE, YELLOW};
use crate::app::App;
use crate::game::Difficulty;
use crate::menu::{menu_layout, Action, Button};

const BANNER: &str = "\
██████╗ ██╗███╗   ██╗ ██████╗    ██████╗  ██████╗ ███╗   ██╗ ██████╗ 
██╔══██╗██║████╗  ██║██╔════╝    ██╔══██╗██╔═══██╗████╗  ██║██╔════╝ 
██████╔╝██║██╔██╗ ██║██║  ███╗   ██████╔╝██║   ██║██╔██╗ ██║██║  ███╗
██╔═══╝ ██║██║╚██╗██║██║   ██║   ██╔═══╝ ██║   ██║██║╚██╗██║██║   ██║
██║     ██║██║ ╚████║╚██████╔╝   ██║     ╚██████╔╝██║ ╚████║╚██████╔╝
╚═╝     ╚═╝╚═╝  ╚═══╝ ╚═════╝    ╚═╝      ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝ ";
const BANNER_WIDTH: u16 = 69;

pub fn render_menu(frame: &mut Frame, area: Rect, app: &mut App, now: Instant) {
    if area.width > 0 && area.height > 0 {
        let backdrop = app
            .assets
            .background
            .fit(area.width as u32, area.height as u32 * 2);
        frame.render_widget(&Canvas::from_image(backdrop), area);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = menu_layout(inner, &app.session);
    app.buttons.replace(layout.buttons, Action::Start);

    // Styles go on the lines, not the paragraph, so the backdrop shows
    // through around the text.
    let title: Vec<Line> = if layout.title.height >= 6 && layout.title.width >= BANNER_WIDTH {
        BANNER
            .lines()
            .map(|row| Line::styled(row, Style::default().fg(WHITE)))
            .collect()
    } else {
        vec![Line::styled(
            "PING PONG",
            Style::default().fg(WHITE).add_modifier(Modifier::BOLD),
        )]
    };
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), layout.title);

    frame.render_widget(
        label(format!("POINTS TO WIN: {}", app.session.points_to_win)),
        layout.points_label,
    );
    frame.render_widget(label("GAME MODE".to_string()), layout.mode_label);
    if let Some(rect) = layout.difficulty_label {
        frame.render_widget(label("AI DIFFICULTY".to_string()), rect);
    }

    let flash = app.flash_on(now);
    for button in app.buttons.buttons() {
        let hovered = app.pointer.position.is_some_and(|p| button.rect.contains(p));
        let focused = app.buttons.is_focused(button.action);
        render_button(frame, button, button_color(button, flash), hovered, focused);
    }

    frame.render_widget(instructions(app.session.is_single_player()), layout.instructions);
}

fn label(text: String) -> Paragraph<'static> {
    Paragraph::new(Line::styled(
        text,
        Style::default().fg(WHITE).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
}

fn button_color(button: &Button, flash: bool) -> Color {
    match button.action {
        Action::DecreasePoints | Action::IncreasePoints => ORANGE,
        Action::SinglePlayer | Action::MultiPlayer => PURPLE,
        Action::Difficulty(Difficulty::Easy) => GREEN,
        Action::Difficulty(Difficulty::Moderate) => ORANGE,
        Action::Difficulty(Difficulty::Hard) => RED,
        Action::ToggleCrazy if button.selected => blend(YELLOW, ORANGE, 0.5),
        Action::ToggleCrazy => blend(PURPLE, Color::Rgb(0, 0, 0), 0.3),
        Action::Start if flash => GREEN,
        Action::Start => YELLOW,
        Action::Restart => GREEN,
        Action::Quit => RED,
    }
}

fn instructions(single_player: bool) -> Paragraph<'static> {
    let key = Style::default().fg(YELLOW).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(WHITE);
    let controls = if single_player {
        Line::from(vec![
            Span::styled("W/S", key),
            Span::styled(" move your paddle against the computer", text),
        ])
    } else {
        Line::from(vec![
            Span::styled("W/S", key),
            Span::styled(" left paddle   ", text),
            Span::styled("↑/↓", key),
            Span::styled(" right paddle", text),
        ])
    };
    let navigation = Line::from(vec![
        Span::styled("Click", key),
        Span::styled(" or ", text),
        Span::styled("Tab/Enter", key),
        Span::styled(" to choose   ", text),
        Span::styled("+/-", key),
        Span::styled(" points   ", text),
        Span::styled("B/X", key),
        Span::styled(" ball size   ", text),
        Span::styled("Q", key),
        Span::styled(" quit", text),
    ]);
    Paragraph::new(vec![controls, navigation]).alignment(Alignment::Center)
}
