// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Backlight TUI.
//!
//! A terminal interface to the RandR backlight property of each display
//! output.
//!
//! This application shows one bar per backlight-capable output of the first
//! screen and lets the user adjust the selected output with the keyboard:
//!
//! * **Up / Down**: Raise or lower the brightness by 5% of the output's range.
//! * **Left / Right**: Select the previous or next output.
//! * **0 - 9**: Jump to the start of the corresponding tenth of the range.
//! * **l / L / Ctrl-L**: Repaint the whole terminal.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Everything runs
//! on the main thread: outputs are discovered once at startup, then the loop
//! alternates between drawing and waiting for a single key. Termination
//! signals only raise a flag, so every exit goes through the same teardown.
//!
//! Later screens are discovered and kept in memory, but only the first one
//! is drawn and controlled.

mod config;
mod discovery;
mod error;
mod events;
mod model;
mod protocol;
mod render;
mod theme;
mod util;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, enable_raw_mode},
};
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend, layout::Rect};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    events::process_events,
    model::Screen,
    protocol::{DisplayServer, x11::X11Backlight},
    render::PROGNAME,
    theme::Theme,
    util::{signals::ShutdownSignal, term::TerminalRestore},
};

const LOG_FILE_NAME: &str = "ncxbacklight.log";

/// Application state, generic over the display server so the event loop
/// can be driven without one.
struct App<S = X11Backlight> {
    pub config: AppConfig,

    pub theme: Theme,

    pub server: S,

    /// Every discovered screen, in server order. Only the first is active.
    pub screens: Vec<Screen>,

    /// Repaint every cell on the next draw instead of diffing.
    pub clear_requested: bool,

    /// Terminal size captured at startup, resizes are not followed.
    pub width: u16,
    pub height: u16,

    pub shutdown: ShutdownSignal,
}

impl App {
    /// Connects to the display server and discovers every backlight output.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be opened or a screen's
    /// resources cannot be enumerated.
    pub fn new(config: AppConfig, shutdown: ShutdownSignal, size: (u16, u16)) -> Result<Self> {
        let server = X11Backlight::connect(&config.backlight_properties)
            .context("Failed to connect to the display server")?;

        let screens = discovery::discover(&server).map_err(|e| {
            error!("Output discovery failed: {}", e);
            e
        })?;

        Ok(Self {
            config,
            theme: Theme::default(),
            server,
            screens,
            clear_requested: false,
            width: size.0,
            height: size.1,
            shutdown,
        })
    }
}

impl<S> App<S> {
    /// The screen driven by input and rendering.
    pub fn active_screen(&self) -> Option<&Screen> {
        self.screens.first()
    }
}

/// The entry point of the application.
///
/// Discovery runs before the terminal is taken over, so a fatal discovery
/// error is reported on a normal terminal and the process exits non-zero.
fn main() -> Result<()> {
    let config = config::load_config();
    let _log_guard = setup_logs(&config);

    let shutdown = ShutdownSignal::register().context("Failed to install signal handlers")?;
    let size = terminal::size().context("Failed to read terminal size")?;

    let mut app = App::new(config, shutdown, size).context("Failed to initialise application")?;
    info!(
        "Discovered {} screen(s), log level {}",
        app.screens.len(),
        app.config.log_level
    );

    let restore = TerminalRestore::default();
    install_panic_hook(restore.clone());

    let res = match setup_terminal(&app) {
        Ok(mut terminal) => run(&mut terminal, &mut app),
        Err(e) => Err(e),
    };

    restore.restore();
    app.server.sync();

    res.context("Application error occurred")
}

/// Installs file logging if enabled.
///
/// The terminal belongs to the UI, so log output goes to a file in the cache
/// directory. The returned guard must be kept alive for the duration of the
/// program to ensure logs are flushed.
fn setup_logs(config: &AppConfig) -> Option<WorkerGuard> {
    if !config.log_to_file {
        return None;
    }

    let dir = config::log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, LOG_FILE_NAME));

    // Precedence: RUST_LOG env var > config file
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Some(guard)
}

/// Restores the terminal before the default panic report is printed.
fn install_panic_hook(restore: TerminalRestore) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore.restore();
        eprintln!("{}: internal fault, terminal restored.", PROGNAME);
        error!("Panic: {}", info);
        default_hook(info);
    }));
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Hides the cursor.
///
/// The viewport is fixed to the size captured at startup.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let viewport = Viewport::Fixed(Rect::new(0, 0, app.width, app.height));
    let mut terminal = Terminal::with_options(backend, TerminalOptions { viewport })
        .context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;

    Ok(terminal)
}

/// Enters the main event loop and stays in it until shutdown.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// terminal error.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    info!("Terminal is {}x{}", app.width, app.height);
    process_events(terminal, app)
}
