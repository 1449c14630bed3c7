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

//! Keyboard input handling.
//!
//! Translates a single key press into a [`KeyAction`] and applies it to the
//! active screen, writing the new brightness to the display server when the
//! selected output's value changed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::{model::Screen, protocol::DisplayServer};

/// What a key press asks the application to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Increase,
    Decrease,
    SelectPrevious,
    SelectNext,
    /// Jump to the start of the given decile of the range.
    Decile(u8),
    /// Repaint every cell on the next draw.
    Redraw,
    /// Ctrl-C or Ctrl-\, which raw mode delivers as keys instead of signals.
    Interrupt,
    Ignore,
}

/// Result of applying a [`KeyAction`] to the active screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub(crate) redraw: bool,
    pub(crate) written: Option<i32>,
}

/// Maps a terminal key event to a [`KeyAction`].
///
/// Only key presses are considered, repeats and releases are ignored.
pub(crate) fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match (key.code, key.modifiers) {
        // Ctrl-\ is reported as Ctrl-4
        (KeyCode::Char('c' | '\\' | '4'), m) if m.contains(KeyModifiers::CONTROL) => {
            KeyAction::Interrupt
        }

        // Form feed arrives as Ctrl-L in raw mode
        (KeyCode::Char('l'), _) | (KeyCode::Char('L'), _) | (KeyCode::Char('\x0c'), _) => {
            KeyAction::Redraw
        }

        (KeyCode::Up, _) => KeyAction::Increase,
        (KeyCode::Down, _) => KeyAction::Decrease,
        (KeyCode::Left, _) => KeyAction::SelectPrevious,
        (KeyCode::Right, _) => KeyAction::SelectNext,

        (KeyCode::Char(c), _) => match c.to_digit(10) {
            Some(d) => KeyAction::Decile(d as u8),
            None => KeyAction::Ignore,
        },

        _ => KeyAction::Ignore,
    }
}

/// Applies one key action to the active screen.
///
/// Every output is first re-read from the server so changes made elsewhere
/// are not overwritten with stale values. If the selected output's value
/// changes it is written back and the connection synced, so the next read
/// sees the new value.
///
/// A screen without outputs only honours [`KeyAction::Redraw`], nothing is
/// read or written.
pub(crate) fn update_active_screen(
    screen: &mut Screen,
    server: &impl DisplayServer,
    action: KeyAction,
) -> Outcome {
    let mut outcome = Outcome {
        redraw: action == KeyAction::Redraw,
        written: None,
    };

    if screen.is_empty() {
        return outcome;
    }

    screen.sync(server);

    match action {
        KeyAction::SelectPrevious => screen.select_previous(),
        KeyAction::SelectNext => screen.select_next(),
        KeyAction::Increase | KeyAction::Decrease | KeyAction::Decile(_) => {
            outcome.written = adjust_selected(screen, action);
        }
        KeyAction::Redraw | KeyAction::Interrupt | KeyAction::Ignore => {}
    }

    if let (Some(value), Some(output)) = (outcome.written, screen.selected_output()) {
        debug!("Setting backlight of {} to {}", output.name, value);
        server.set_value(output.id, value);
        server.sync();
    }

    outcome
}

// Computes and stores the selected output's new value, returning it.
fn adjust_selected(screen: &mut Screen, action: KeyAction) -> Option<i32> {
    let output = screen.selected_output_mut()?;
    let range = output.range;

    let value = match action {
        KeyAction::Increase => range.offset(output.value(), range.step()),
        KeyAction::Decrease => range.offset(output.value(), -range.step()),
        KeyAction::Decile(d) => range.decile(d),
        _ => return None,
    };

    output.set_value(value);
    Some(output.value())
}
