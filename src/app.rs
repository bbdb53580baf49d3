use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

use crate::assets::Assets;
use crate::audio::Sfx;
use crate::game::{GameEvent, Match, Phase};
use crate::input::{Keyboard, Pointer};
use crate::menu::{Action, ButtonMap, Debounce, ADJUST_DELAY};
use crate::session::{GameMode, Session};

/// START blinks between two colours at this period.
const FLASH_PERIOD: Duration = Duration::from_millis(200);

pub struct App {
    pub should_quit: bool,
    pub session: Session,
    pub game: Match,
    pub buttons: ButtonMap,
    pub keyboard: Keyboard,
    pub pointer: Pointer,
    pub assets: Assets,
    sfx: Sfx,
    adjust: Debounce,
    started_at: Instant,
}

impl App {
    pub fn new(session: Session, assets: Assets, sfx: Sfx, reports_release: bool) -> Self {
        let game = Match::new(&session);
        Self {
            should_quit: false,
            session,
            game,
            buttons: ButtonMap::default(),
            keyboard: Keyboard::new(reports_release),
            pointer: Pointer::default(),
            assets,
            sfx,
            adjust: Debounce::new(ADJUST_DELAY),
            started_at: Instant::now(),
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.handle_pointer(now);

        let input = self.keyboard.tick_input(now);
        for event in self.game.tick(&self.session, &input) {
            match event {
                GameEvent::PaddleHit(side) => {
                    tracing::trace!(?side, speed = self.game.ball.speed, "paddle hit");
                    self.sfx.play_collision();
                }
                GameEvent::Scored {
                    scorer,
                    left,
                    right,
                } => tracing::debug!(?scorer, left, right, "point"),
                GameEvent::MatchOver { winner } => tracing::info!(?winner, "match over"),
            }
        }
        self.keyboard.prune(now);
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        self.pointer.record(&mouse);
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        self.keyboard.record(&key, now);
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let pressed = key.kind == KeyEventKind::Press;
        match key.code {
            KeyCode::Char('b') | KeyCode::Char('B') if pressed => {
                if self.session.grow_ball() {
                    self.game.resize_ball(self.session.ball_size);
                }
                return;
            }
            KeyCode::Char('x') | KeyCode::Char('X') if pressed => {
                if self.session.shrink_ball() {
                    self.game.resize_ball(self.session.ball_size);
                }
                return;
            }
            _ => {}
        }

        match self.game.phase() {
            Phase::Menu => match key.code {
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    self.perform(Action::IncreasePoints, now);
                }
                KeyCode::Char('-') | KeyCode::Char('_') => {
                    self.perform(Action::DecreasePoints, now);
                }
                _ if pressed => self.on_screen_key(key.code, now),
                _ => {}
            },
            Phase::GameOver if pressed => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.perform(Action::Restart, now);
                }
                code => self.on_screen_key(code, now),
            },
            // Paddles read the held-key snapshot on the next tick.
            _ => {}
        }
    }

    /// Focus movement, activation and quitting on the menu and game-over
    /// screens.
    fn on_screen_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => self.buttons.focus_next(),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => self.buttons.focus_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(action) = self.buttons.focused() {
                    self.perform(action, now);
                }
            }
            _ => {}
        }
    }

    fn handle_pointer(&mut self, now: Instant) {
        let clicked = self.pointer.take_click();
        let Some(action) = self.pointer.position.and_then(|p| self.buttons.hit(p)) else {
            return;
        };
        if clicked || (self.pointer.pressed && action.repeats()) {
            self.perform(action, now);
        }
    }

    /// Runs a button's action. Actions belonging to another screen are
    /// ignored, as are point changes inside the debounce window. Returns
    /// true if anything changed.
    pub fn perform(&mut self, action: Action, now: Instant) -> bool {
        if action.phase() != self.game.phase() {
            return false;
        }
        let changed = match action {
            Action::DecreasePoints => self.adjust.ready(now) && self.session.decrease_points(),
            Action::IncreasePoints => self.adjust.ready(now) && self.session.increase_points(),
            Action::SinglePlayer => self.set_mode(GameMode::SinglePlayer),
            Action::MultiPlayer => self.set_mode(GameMode::MultiPlayer),
            Action::Difficulty(difficulty) => {
                let changed = self.session.difficulty != difficulty;
                self.session.difficulty = difficulty;
                changed
            }
            Action::ToggleCrazy => {
                self.session.toggle_crazy();
                true
            }
            Action::Start => self.game.start(&self.session),
            Action::Restart => self.game.restart(&self.session),
            Action::Quit => {
                self.should_quit = true;
                true
            }
        };
        if changed {
            tracing::debug!(?action, session = ?self.session, "menu action");
        }
        changed
    }

    fn set_mode(&mut self, mode: GameMode) -> bool {
        let changed = self.session.mode != mode;
        self.session.mode = mode;
        changed
    }

    /// Which of the two START colours to show at `now`.
    pub fn flash_on(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_millis() / FLASH_PERIOD.as_millis()) % 2 == 0
    }
}
