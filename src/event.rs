use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, MouseEvent};

/// How long the reader thread blocks before checking whether the loop is gone.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
}

/// Terminal input from a reader thread, interleaved with fixed-rate ticks.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tick_rate: Duration,
    next_tick: Instant,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                continue;
            }
            let sent = match event::read() {
                Ok(event::Event::Key(key)) => tx.send(Event::Key(key)),
                Ok(event::Event::Mouse(mouse)) => tx.send(Event::Mouse(mouse)),
                Ok(_) => Ok(()),
                Err(_) => return,
            };
            if sent.is_err() {
                return;
            }
        });

        Self::with_receiver(rx, tick_rate)
    }

    fn with_receiver(rx: mpsc::Receiver<Event>, tick_rate: Duration) -> Self {
        Self {
            rx,
            tick_rate,
            next_tick: Instant::now() + tick_rate,
        }
    }

    /// Next input event, or `Tick` once the tick deadline passes. Input
    /// arriving faster than the tick rate never delays a tick.
    pub fn next(&mut self) -> io::Result<Event> {
        let now = Instant::now();
        if now >= self.next_tick {
            return Ok(self.tick(now));
        }
        match self.rx.recv_timeout(self.next_tick - now) {
            Ok(event) => Ok(event),
            Err(RecvTimeoutError::Timeout) => Ok(self.tick(Instant::now())),
            Err(e @ RecvTimeoutError::Disconnected) => {
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }

    fn tick(&mut self, now: Instant) -> Event {
        self.next_tick += self.tick_rate;
        // Fell more than a tick behind: skip ahead rather than burst.
        if self.next_tick < now {
            self.next_tick = now + self.tick_rate;
        }
        Event::Tick
    }
}
