mod app;
mod assets;
mod audio;
mod cli;
mod event;
mod game;
mod input;
mod menu;
mod session;
mod ui;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use assets::Assets;
use audio::Sfx;
use cli::Cli;
use event::{Event, EventHandler};
use game::Court;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let session = cli.session();
    let settings = cli.settings();
    init_logging(&settings.log_file);

    // Put the terminal back before the panic message is printed
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    tracing::info!(?session, ?settings, "starting rustpong");

    let assets = Assets::load(&settings.assets, &Court::STANDARD);
    let sfx = if settings.mute {
        Sfx::muted()
    } else {
        Sfx::load_or_mute(&settings.assets, true)
    };
    tracing::info!(muted = sfx.is_muted(), "audio ready");

    let reports_release = match setup_terminal() {
        Ok(reports_release) => reports_release,
        Err(err) => {
            restore_terminal();
            return Err(err);
        }
    };
    tracing::info!(reports_release, "terminal ready");

    let mut app = App::new(session, assets, sfx, reports_release);
    let result = run(&mut app, settings.tick_rate);

    restore_terminal();
    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting with error");
    }
    result
}

/// Raw mode, alternate screen and mouse capture. Returns whether the
/// terminal will report key releases.
fn setup_terminal() -> Result<bool> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter the alternate screen")?;
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )
        .context("failed to enable key release events")?;
    }
    Ok(reports_release)
}

fn run(app: &mut App, tick_rate: std::time::Duration) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to open the terminal")?;
    terminal.clear()?;

    let mut events = EventHandler::new(tick_rate);
    loop {
        match events.next()? {
            Event::Tick => {
                let now = Instant::now();
                app.on_tick(now);
                terminal.draw(|frame| ui::render(frame, app, now))?;
            }
            Event::Key(key) => app.on_key(key, Instant::now()),
            Event::Mouse(mouse) => app.on_mouse(mouse),
        }

        if app.should_quit {
            tracing::info!("quit");
            return Ok(());
        }
    }
}

/// Logs go to a file because the terminal belongs to the UI.
fn init_logging(path: &Path) {
    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let Ok(file) = File::create(path).or_else(|_| File::create(null_device)) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
    let _ = execute!(stdout, crossterm::cursor::Show);
}
