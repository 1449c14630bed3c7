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

//! Render a single backlight bar.
//!
//! A bar is a two cell wide box drawn upwards from a bottom row, filled with
//! shade blocks in proportion to the brightness percentage, with the
//! percentage and the output label printed underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::{line, shade},
    widgets::Widget,
};

use crate::theme::Theme;

/// A vertical meter for one output.
///
/// Coordinates are absolute and may fall outside the area being rendered into,
/// anything outside is clipped.
pub(crate) struct BacklightBar<'a> {
    /// Left edge of the bar's layout box; the box itself starts two cells in.
    pub(crate) x: i32,
    /// Row of the bottom border.
    pub(crate) y: i32,
    pub(crate) height: i32,
    pub(crate) percent: i64,
    pub(crate) label: &'a str,
    pub(crate) selected: bool,
    pub(crate) theme: &'a Theme,
}

impl BacklightBar<'_> {
    /// Whether the fill reaches the given row, counted upwards from 1.
    ///
    /// Each row stands for a percentage threshold rather than a fraction of
    /// the value, giving a coarse block meter.
    pub(crate) fn is_filled(percent: i64, row: i32, height: i32) -> bool {
        height > 0 && percent > i64::from(row) * 100 / i64::from(height)
    }
}

impl Widget for BacklightBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (x, y, h) = (self.x, self.y, self.height);
        let border = Style::default().fg(self.theme.border_colour);
        let fill = Style::default().fg(self.theme.bar_colour);

        put_str(buf, area, x + 2, y, line::BOTTOM_LEFT, border);
        put_str(buf, area, x + 3, y, line::HORIZONTAL, border);
        put_str(buf, area, x + 4, y, line::HORIZONTAL, border);
        put_str(buf, area, x + 5, y, line::BOTTOM_RIGHT, border);

        for row in 1..h {
            put_str(buf, area, x + 2, y - row, line::VERTICAL, border);
            put_str(buf, area, x + 5, y - row, line::VERTICAL, border);

            let symbol = if Self::is_filled(self.percent, row, h) {
                shade::MEDIUM
            } else {
                " "
            };
            put_str(buf, area, x + 3, y - row, symbol, fill);
            put_str(buf, area, x + 4, y - row, symbol, fill);
        }

        put_str(buf, area, x + 2, y - h, line::TOP_LEFT, border);
        put_str(buf, area, x + 3, y - h, line::HORIZONTAL, border);
        put_str(buf, area, x + 4, y - h, line::HORIZONTAL, border);
        put_str(buf, area, x + 5, y - h, line::TOP_RIGHT, border);

        let value = self.percent.to_string();
        let value_x = x + 3 - i32::from(self.percent >= 100);
        put_str(
            buf,
            area,
            value_x,
            y + 1,
            &value,
            Style::default().fg(self.theme.value_colour),
        );

        let (label, style) = if self.selected {
            (
                format!("<{}>", self.label),
                Style::default()
                    .fg(self.theme.selected_label_colour)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                self.label.to_string(),
                Style::default().fg(self.theme.label_colour),
            )
        };
        let label_x = x + 3 - label.chars().count() as i32 / 2;
        put_str(buf, area, label_x, y + 2, &label, style);
    }
}

// Writes `text` one cell per char starting at (x, y), skipping cells outside
// `clip`.
fn put_str(buf: &mut Buffer, clip: Rect, x: i32, y: i32, text: &str, style: Style) {
    let inside_rows = i32::from(clip.top())..i32::from(clip.bottom());
    if !inside_rows.contains(&y) {
        return;
    }
    let inside_cols = i32::from(clip.left())..i32::from(clip.right());

    let mut symbol = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if !inside_cols.contains(&cx) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((cx as u16, y as u16)) {
            cell.set_symbol(ch.encode_utf8(&mut symbol)).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_fill_thresholds() {
        // 12 rows: thresholds 8, 16, 25, 33, 41, 50, ...
        let filled: Vec<_> = (1..12).filter(|&r| BacklightBar::is_filled(50, r, 12)).collect();
        assert_eq!(filled, vec![1, 2, 3, 4, 5]);

        assert!(!BacklightBar::is_filled(0, 1, 12));
        assert!((1..12).all(|r| BacklightBar::is_filled(100, r, 12)));
        assert!(!BacklightBar::is_filled(100, 1, 0));
    }

    #[test]
    fn test_render_bar() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 10);
        let mut buf = Buffer::empty(area);

        BacklightBar {
            x: 0,
            y: 6,
            height: 4,
            percent: 100,
            label: "LVDS",
            selected: true,
            theme: &theme,
        }
        .render(area, &mut buf);

        assert_eq!(row(&buf, 2), "  ┌──┐      ");
        assert_eq!(row(&buf, 3), "  │▒▒│      ");
        assert_eq!(row(&buf, 5), "  │▒▒│      ");
        assert_eq!(row(&buf, 6), "  └──┘      ");
        assert_eq!(row(&buf, 7), "  100       ");
        assert_eq!(row(&buf, 8), "<LVDS>      ");
    }

    #[test]
    fn test_render_clips_outside_area() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);

        BacklightBar {
            x: -3,
            y: 5,
            height: 20,
            percent: 40,
            label: "a-very-long-output-name",
            selected: false,
            theme: &theme,
        }
        .render(area, &mut buf);

        assert_eq!(row(&buf, 0), "▒▒│ ");
        assert_eq!(row(&buf, 2), "▒▒│ ");
    }
}
