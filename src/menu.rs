//! Screen buttons: where they are, which one has focus, and what they do.

use std::time::{Duration, Instant};

use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};

use crate::game::{Difficulty, Phase};
use crate::session::{GameMode, Session};

/// Minimum gap between two accepted points-to-win adjustments.
pub const ADJUST_DELAY: Duration = Duration::from_millis(200);

const BUTTON_HEIGHT: u16 = 3;
const BANNER_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DecreasePoints,
    IncreasePoints,
    SinglePlayer,
    MultiPlayer,
    Difficulty(Difficulty),
    ToggleCrazy,
    Start,
    Restart,
    Quit,
}

impl Action {
    /// Fires every tick while the mouse button is held on it.
    pub fn repeats(&self) -> bool {
        matches!(self, Action::DecreasePoints | Action::IncreasePoints)
    }

    /// Screen the action belongs to.
    pub fn phase(&self) -> Phase {
        match self {
            Action::Restart | Action::Quit => Phase::GameOver,
            _ => Phase::Menu,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub action: Action,
    pub label: String,
    pub rect: Rect,
    /// Currently chosen option (mode, difficulty, crazy on).
    pub selected: bool,
}

impl Button {
    fn new(action: Action, label: impl Into<String>, rect: Rect, selected: bool) -> Self {
        Self {
            action,
            label: label.into(),
            rect,
            selected,
        }
    }
}

/// Buttons on screen right now plus keyboard focus.
#[derive(Debug, Default)]
pub struct ButtonMap {
    buttons: Vec<Button>,
    focus: usize,
}

impl ButtonMap {
    /// Swaps in a freshly laid out set. Focus stays on the same action when
    /// it is still present, otherwise lands on `fallback`.
    pub fn replace(&mut self, buttons: Vec<Button>, fallback: Action) {
        let focused = self.focused();
        self.buttons = buttons;
        self.focus = focused
            .and_then(|action| self.position(action))
            .or_else(|| self.position(fallback))
            .unwrap_or(0);
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
        self.focus = 0;
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn hit(&self, position: Position) -> Option<Action> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(position))
            .map(|b| b.action)
    }

    pub fn focused(&self) -> Option<Action> {
        self.buttons.get(self.focus).map(|b| b.action)
    }

    pub fn is_focused(&self, action: Action) -> bool {
        self.focused() == Some(action)
    }

    pub fn focus_next(&mut self) {
        if !self.buttons.is_empty() {
            self.focus = (self.focus + 1) % self.buttons.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.buttons.is_empty() {
            self.focus = (self.focus + self.buttons.len() - 1) % self.buttons.len();
        }
    }

    fn position(&self, action: Action) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }
}

/// Accepts an event only if `delay` has passed since the last accepted one.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    last: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.delay => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

pub struct MenuLayout {
    pub title: Rect,
    pub points_label: Rect,
    pub mode_label: Rect,
    pub difficulty_label: Option<Rect>,
    pub instructions: Rect,
    pub buttons: Vec<Button>,
}

pub fn menu_layout(area: Rect, session: &Session) -> MenuLayout {
    let [body, instructions] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(area);

    let banner = if body.height >= 34 { BANNER_HEIGHT } else { 1 };
    let [title, _, points_label, points_row, _, mode_label, mode_row, _, difficulty_label, difficulty_row, _, crazy_row, _, start_row] =
        Layout::vertical([
            Constraint::Length(banner),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .flex(Flex::Center)
        .areas(body);

    let mut buttons = Vec::new();

    let [minus, plus] = centered_row(points_row, [7, 7], 10);
    buttons.push(Button::new(Action::DecreasePoints, "-", minus, false));
    buttons.push(Button::new(Action::IncreasePoints, "+", plus, false));

    let [single, multi] = centered_row(mode_row, [14, 14], 2);
    buttons.push(Button::new(
        Action::SinglePlayer,
        GameMode::SinglePlayer.label(),
        single,
        session.mode == GameMode::SinglePlayer,
    ));
    buttons.push(Button::new(
        Action::MultiPlayer,
        GameMode::MultiPlayer.label(),
        multi,
        session.mode == GameMode::MultiPlayer,
    ));

    let difficulty_label = if session.is_single_player() {
        let rects = centered_row(difficulty_row, [10, 12, 10], 2);
        for (difficulty, rect) in [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard]
            .into_iter()
            .zip(rects)
        {
            buttons.push(Button::new(
                Action::Difficulty(difficulty),
                difficulty.label(),
                rect,
                session.difficulty == difficulty,
            ));
        }
        Some(difficulty_label)
    } else {
        None
    };

    let [crazy] = centered_row(crazy_row, [18], 0);
    let crazy_label = if session.crazy { "CRAZY: ON" } else { "CRAZY: OFF" };
    buttons.push(Button::new(Action::ToggleCrazy, crazy_label, crazy, session.crazy));

    let [start] = centered_row(start_row, [20], 0);
    buttons.push(Button::new(Action::Start, "START", start, false));

    MenuLayout {
        title,
        points_label,
        mode_label,
        difficulty_label,
        instructions,
        buttons,
    }
}

pub struct GameOverLayout {
    pub headline: Rect,
    pub subline: Rect,
    pub buttons: Vec<Button>,
}

pub fn game_over_layout(area: Rect) -> GameOverLayout {
    let [headline, subline, _, restart_row, _, quit_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(BUTTON_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(BUTTON_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(area);

    let [restart] = centered_row(restart_row, [20], 0);
    let [quit] = centered_row(quit_row, [20], 0);
    GameOverLayout {
        headline,
        subline,
        buttons: vec![
            Button::new(Action::Restart, "RESTART", restart, false),
            Button::new(Action::Quit, "QUIT", quit, false),
        ],
    }
}

fn centered_row<const N: usize>(row: Rect, widths: [u16; N], spacing: u16) -> [Rect; N] {
    Layout::horizontal(widths.map(Constraint::Length))
        .flex(Flex::Center)
        .spacing(spacing)
        .areas(row)
}
