//! Per-tick input snapshot built from terminal events.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::game::TickInput;

/// Terminals that never send key releases: a key counts as held for this
/// long after its last press or repeat.
pub const HOLD_WINDOW: Duration = Duration::from_millis(180);

pub struct Keyboard {
    held: HashMap<KeyCode, Instant>,
    reports_release: bool,
}

impl Keyboard {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashMap::new(),
            reports_release,
        }
    }

    pub fn record(&mut self, key: &KeyEvent, now: Instant) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(code, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&code);
            }
        }
    }

    pub fn is_down(&self, code: KeyCode, now: Instant) -> bool {
        let Some(&seen) = self.held.get(&normalize(code)) else {
            return false;
        };
        self.reports_release || now.saturating_duration_since(seen) < HOLD_WINDOW
    }

    /// W/S drive the left paddle, the arrow keys the right one.
    pub fn tick_input(&self, now: Instant) -> TickInput {
        TickInput {
            left_up: self.is_down(KeyCode::Char('w'), now),
            left_down: self.is_down(KeyCode::Char('s'), now),
            right_up: self.is_down(KeyCode::Up, now),
            right_down: self.is_down(KeyCode::Down, now),
        }
    }

    /// Drops keys whose hold window ran out.
    pub fn prune(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }
        self.held
            .retain(|_, seen| now.saturating_duration_since(*seen) < HOLD_WINDOW);
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Mouse position and left-button state.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pointer {
    pub position: Option<Position>,
    pub pressed: bool,
    just_pressed: bool,
}

impl Pointer {
    pub fn record(&mut self, event: &MouseEvent) {
        self.position = Some(Position::new(event.column, event.row));
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = true;
                self.just_pressed = true;
            }
            MouseEventKind::Drag(MouseButton::Left) => self.pressed = true,
            MouseEventKind::Up(MouseButton::Left) => self.pressed = false,
            _ => {}
        }
    }

    /// True once per press, even if the button was already released again.
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.just_pressed)
    }
}
