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

//! Domain models and core data structures.
//!
//! This module defines the screens and backlight-capable outputs the
//! application controls, and keeps their values in step with the hardware.

use crate::protocol::{DisplayServer, OutputId, Range, WindowId};

/// One controllable backlight output.
///
/// The value always lies within the range, anything read from or computed for
/// the output is clamped before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Output {
    pub(crate) id: OutputId,
    pub(crate) name: String,
    pub(crate) range: Range,
    value: i32,
}

impl Output {
    /// Creates an output, using the range minimum if the value was unreadable.
    pub(crate) fn new(id: OutputId, name: String, range: Range, value: Option<i32>) -> Self {
        Self {
            id,
            name,
            range,
            value: range.clamp(value.unwrap_or(range.min)),
        }
    }

    pub(crate) fn value(&self) -> i32 {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: i32) {
        self.value = self.range.clamp(value);
    }

    /// Re-reads the value from the server, keeping the current value if the
    /// read fails.
    pub(crate) fn sync(&mut self, server: &impl DisplayServer) {
        if let Some(value) = server.get_value(self.id) {
            self.set_value(value);
        }
    }
}

/// One screen and the backlight outputs discovered on it.
#[derive(Debug, Clone)]
pub(crate) struct Screen {
    pub(crate) root: WindowId,
    outputs: Vec<Output>,
    selected: usize,
}

impl Screen {
    pub(crate) fn new(root: WindowId, outputs: Vec<Output>) -> Self {
        Self {
            root,
            outputs,
            selected: 0,
        }
    }

    pub(crate) fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Index of the output targeted by brightness keys.
    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn selected_output(&self) -> Option<&Output> {
        self.outputs.get(self.selected)
    }

    pub(crate) fn selected_output_mut(&mut self) -> Option<&mut Output> {
        self.outputs.get_mut(self.selected)
    }

    pub(crate) fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(crate) fn select_next(&mut self) {
        if self.selected + 1 < self.outputs.len() {
            self.selected += 1;
        }
    }

    /// Refreshes every output value from the server, so changes made by other
    /// clients become visible.
    pub(crate) fn sync(&mut self, server: &impl DisplayServer) {
        for output in &mut self.outputs {
            output.sync(server);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::fake::FakeServer;

    fn screen(values: &[(i32, i32, i32)]) -> Screen {
        let outputs = values
            .iter()
            .enumerate()
            .map(|(i, &(min, max, value))| {
                Output::new(OutputId(i as u32), format!("OUT-{}", i), Range::new(min, max), Some(value))
            })
            .collect();
        Screen::new(WindowId(1), outputs)
    }

    #[test]
    fn test_new_output_clamps_value() {
        let range = Range::new(10, 100);
        assert_eq!(Output::new(OutputId(1), "A".into(), range, Some(500)).value(), 100);
        assert_eq!(Output::new(OutputId(1), "A".into(), range, Some(-3)).value(), 10);
        assert_eq!(Output::new(OutputId(1), "A".into(), range, None).value(), 10);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut output = Output::new(OutputId(1), "A".into(), Range::new(0, 1000), Some(10));
        output.set_value(1200);
        assert_eq!(output.value(), 1000);
        output.set_value(-1);
        assert_eq!(output.value(), 0);
    }

    #[test]
    fn test_selection_bounds() {
        let mut screen = screen(&[(0, 10, 1), (0, 10, 2), (0, 10, 3)]);
        assert_eq!(screen.selected(), 0);

        screen.select_previous();
        assert_eq!(screen.selected(), 0);

        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected(), 2);

        screen.select_next();
        assert_eq!(screen.selected(), 2);
        assert_eq!(screen.selected_output().map(Output::value), Some(3));
    }

    #[test]
    fn test_selection_on_empty_screen() {
        let mut screen = screen(&[]);
        screen.select_next();
        screen.select_previous();
        assert_eq!(screen.selected(), 0);
        assert!(screen.selected_output().is_none());
    }

    #[test]
    fn test_sync_picks_up_external_changes() {
        let server = FakeServer::with_outputs(&[(0, 1000, 100), (0, 50, 5)]);
        let outputs = server.screens[0]
            .1
            .iter()
            .map(|d| Output::new(d.id, d.name.clone(), server.ranges[&d.id], server.value(d.id)))
            .collect();
        let mut screen = Screen::new(WindowId(1), outputs);

        server.set_external(OutputId(100), 700);
        server.set_external(OutputId(101), 900);
        screen.sync(&server);

        assert_eq!(screen.outputs()[0].value(), 700);
        assert_eq!(screen.outputs()[1].value(), 50);
    }

    #[test]
    fn test_sync_keeps_value_when_unreadable() {
        let server = FakeServer::default();
        let mut screen = screen(&[(0, 1000, 250)]);
        screen.sync(&server);
        assert_eq!(screen.outputs()[0].value(), 250);
    }
}
