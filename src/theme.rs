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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and converts colors to
//! the hexadecimal form used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) title_colour: Color,
    pub(crate) bar_colour: Color,
    pub(crate) value_colour: Color,
    pub(crate) label_colour: Color,
    pub(crate) selected_label_colour: Color,
    pub(crate) message_colour: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(20, 20, 28),
            border_colour: Color::Rgb(102, 102, 102),
            title_colour: Color::Rgb(255, 255, 255),
            bar_colour: Color::Rgb(250, 189, 47),
            value_colour: Color::Rgb(162, 161, 166),
            label_colour: Color::Rgb(162, 161, 166),
            selected_label_colour: Color::Rgb(250, 189, 47),
            message_colour: Color::Rgb(179, 157, 219),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// Returns `None` for anything other than a [`Color::Rgb`] colour, since
    /// only those have an exact hexadecimal form.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(Theme::to_hex(Color::Rgb(20, 20, 28)).as_deref(), Some("#14141c"));
        assert_eq!(Theme::to_hex(Color::Red), None);
    }
}
