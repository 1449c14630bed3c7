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

//! Application event loop.
//!
//! This module bridges user input and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The loop is single-threaded and strictly alternates:
//!
//! 1. **Render**: The active screen is drawn from the values already held in
//!    memory.
//! 2. **Capture**: The loop blocks until one key arrives or a shutdown is
//!    requested.
//! 3. **Process**: The active screen is re-synchronized with the display
//!    server and the key applied, see [`key_handlers`].

pub(crate) mod key_handlers;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent};
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, info};

use crate::{
    App,
    events::key_handlers::{KeyAction, map_key, update_active_screen},
    protocol::DisplayServer,
    render::draw,
    util::signals::ShutdownSignal,
};

/// How often the key wait checks for a pending shutdown.
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Shutdown,
}

/// Runs the main application loop, rendering the UI and handling one key per
/// iteration.
///
/// This function loops until a shutdown is requested by a termination signal
/// or an interrupt key.
///
/// # Errors
///
/// Returns an error if the terminal cannot be drawn to or read from.
pub(crate) fn process_events<B, S>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    S: DisplayServer,
{
    loop {
        render_frame(terminal, app)?;

        match next_event(&app.shutdown)? {
            AppEvent::Key(key) => process_key_event(app, key),
            AppEvent::Shutdown => break,
        }

        if app.shutdown.is_requested() {
            break;
        }
    }

    info!("Shutdown requested");
    Ok(())
}

/// Draws the active screen, first wiping the terminal if a redraw key asked
/// for it. The request is consumed by this draw.
fn render_frame<B, S>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    if app.clear_requested {
        terminal.clear()?;
        app.clear_requested = false;
    }

    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

// Blocks until a key event arrives or a shutdown is requested. Other terminal
// events, including resizes, are dropped.
fn next_event(shutdown: &ShutdownSignal) -> Result<AppEvent> {
    loop {
        if shutdown.is_requested() {
            return Ok(AppEvent::Shutdown);
        }

        if event::poll(SHUTDOWN_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
    }
}

/// Applies a key to the active screen, the first discovered one.
fn process_key_event<S: DisplayServer>(app: &mut App<S>, key: KeyEvent) {
    let action = map_key(key);
    debug!("Key {:?} mapped to {:?}", key.code, action);

    if action == KeyAction::Interrupt {
        app.shutdown.request();
        return;
    }

    let Some(screen) = app.screens.first_mut() else {
        app.clear_requested |= action == KeyAction::Redraw;
        return;
    };

    let outcome = update_active_screen(screen, &app.server, action);
    app.clear_requested |= outcome.redraw;
}
