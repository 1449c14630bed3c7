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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. Rendering only reads the values
//! already held by the model, it never talks to the display server.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called once per
//! input cycle before waiting for the next key.

mod bar;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::{App, model::Screen, render::bar::BacklightBar, theme::Theme};

pub(crate) const PROGNAME: &str = "NCXBacklight";

/// Version shown in the title, major and minor only.
const TITLE_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR")
);

const NO_OUTPUTS_MESSAGE: &str = "no outputs found with valid backlight property";

/// Rows between the bottom of a bar and the bottom of the terminal.
const BAR_BOTTOM_OFFSET: i32 = 5;

/// Rows of the terminal not used by the bar body.
const BAR_HEIGHT_MARGIN: i32 = 8;

/// Renders the active screen to the terminal frame.
pub(crate) fn draw<S>(f: &mut Frame, app: &App<S>) {
    draw_screen(f, app.active_screen(), &app.theme);
}

/// Renders the frame and one bar per output of `screen`, or a diagnostic
/// message if there are no outputs to show.
pub(crate) fn draw_screen(f: &mut Frame, screen: Option<&Screen>, theme: &Theme) {
    let area = f.area();

    let title = format!(" {} v{} ", PROGNAME, TITLE_VERSION);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour))
        .title(title)
        .title_style(
            Style::default()
                .fg(theme.title_colour)
                .add_modifier(Modifier::BOLD),
        )
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let outputs = screen.map(Screen::outputs).unwrap_or_default();
    if outputs.is_empty() {
        draw_no_outputs(f, inner, theme);
        return;
    }

    let width = i32::from(area.width);
    let height = i32::from(area.height);
    let spacing = width / (outputs.len() as i32 + 1);
    let selected = screen.map(Screen::selected);

    for (i, output) in outputs.iter().enumerate() {
        let bar = BacklightBar {
            x: (i as i32 + 1) * spacing - 2,
            y: height - BAR_BOTTOM_OFFSET,
            height: height - BAR_HEIGHT_MARGIN,
            percent: output.range.percent(output.value()),
            label: &output.name,
            selected: selected == Some(i),
            theme,
        };
        f.render_widget(bar, inner);
    }
}

fn draw_no_outputs(f: &mut Frame, area: Rect, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let row = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    let message = Paragraph::new(NO_OUTPUTS_MESSAGE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.message_colour));
    f.render_widget(message, row);
}
