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

//! Terminal environment and styling utilities.
//!
//! This module provides functions to manipulate the terminal emulator's
//! properties, such as background colors, using OSC (Operating System Command)
//! escape sequences, and the routine that puts the terminal back the way it
//! was found.
//!
//! # Compatibility
//!
//! The color functions rely on the terminal emulator supporting the specific
//! OSC codes. Most modern terminals (XTerm, iTerm2, Alacritty, Kitty) support
//! these sequences, others ignore them.

use std::{
    io::{self, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crossterm::{
    cursor, execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};

/// Sets the terminal background color using an OSC 11 escape sequence.
///
/// # Arguments
///
/// * `hex_color` - A string slice representing the color (e.g., `"#1e1e1e"`).
pub(crate) fn set_terminal_bg(hex_color: &str) {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]11;{}\x07", hex_color).ok();
    stdout.flush().ok();
}

/// Resets the terminal background to its default color with OSC 111.
pub(crate) fn reset_terminal_bg() {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]111\x07").ok();
    stdout.flush().ok();
}

/// Restores the terminal to its original state, at most once.
///
/// Clones share the same state, so the main loop and the panic hook can both
/// hold one and whichever runs first does the work.
#[derive(Clone, Debug, Default)]
pub(crate) struct TerminalRestore {
    restored: Arc<AtomicBool>,
}

impl TerminalRestore {
    /// Disables raw mode, leaves the alternate screen, shows the cursor and
    /// resets the background color.
    ///
    /// This is best-effort and does not return a result, as it is called
    /// during cleanup or panic handling. Returns `false` if the terminal had
    /// already been restored.
    pub(crate) fn restore(&self) -> bool {
        if self.restored.swap(true, Ordering::SeqCst) {
            return false;
        }

        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show).ok();
        reset_terminal_bg();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_runs_once_across_clones() {
        let restore = TerminalRestore::default();
        let hook = restore.clone();

        assert!(hook.restore());
        assert!(!restore.restore());
        assert!(!hook.restore());
    }
}
