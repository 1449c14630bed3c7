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

//! Backlight property protocol.
//!
//! This module defines the operations the rest of the application needs from
//! the display server: enumerating screens and their outputs, and reading,
//! querying the range of, and writing the backlight property of an output.
//!
//! # Sub-modules
//!
//! * [`x11`]: The RandR implementation of [`DisplayServer`] on top of `x11rb`.
//!
//! All operations apart from resource enumeration are best-effort. A missing
//! or malformed reply is reported as `None`, never as an error.

pub(crate) mod x11;

use crate::error::BacklightError;

/// Label used for outputs the server does not name.
pub(crate) const DEFAULT_OUTPUT_NAME: &str = "OUT";

/// Opaque handle of a screen's root window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct WindowId(pub(crate) u32);

/// Opaque handle of a display output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct OutputId(pub(crate) u32);

/// Opaque handle of the resolved backlight property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PropertyId(pub(crate) u32);

/// An output handle as reported by screen resource enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OutputDescriptor {
    pub(crate) id: OutputId,
    pub(crate) name: String,
}

/// The inclusive range of valid backlight values reported for an output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Range {
    pub(crate) min: i32,
    pub(crate) max: i32,
}

impl Range {
    pub(crate) const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Whether an output with this range can be controlled at all.
    pub(crate) const fn is_valid(&self) -> bool {
        self.max > 0 && self.min < self.max
    }

    pub(crate) fn clamp(&self, value: i32) -> i32 {
        value.max(self.min).min(self.max)
    }

    fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    /// The brightness change applied by a single up or down key press.
    ///
    /// This is 5% of the range. Unlike the plain `span / 10 / 2` formula,
    /// which yields zero for spans under 20 and leaves such outputs stuck,
    /// the step is never less than one unit.
    pub(crate) fn step(&self) -> i32 {
        let step = self.span() / 10 / 2;
        step.clamp(1, i64::from(i32::MAX)) as i32
    }

    /// The value at the start of the given decile of the range.
    ///
    /// The span is scaled before dividing, so ranges that are not a multiple
    /// of ten keep their precision. Digits above nine are treated as nine.
    pub(crate) fn decile(&self, digit: u8) -> i32 {
        let digit = i64::from(digit.min(9));
        let value = i64::from(self.min) + self.span() * digit / 10;
        self.clamp(value as i32)
    }

    /// Adds `delta` to `value` and clamps the result into the range.
    pub(crate) fn offset(&self, value: i32, delta: i32) -> i32 {
        self.clamp(value.saturating_add(delta))
    }

    /// The value as a percentage of the maximum, as displayed under a bar.
    pub(crate) fn percent(&self, value: i32) -> i64 {
        if self.max <= 0 {
            return 0;
        }
        i64::from(value) * 100 / i64::from(self.max)
    }
}

/// The display server operations used by discovery, the input controller
/// and shutdown.
///
/// Requests are not flushed individually. Callers that need a write to be
/// visible to the next read must call [`DisplayServer::sync`].
pub(crate) trait DisplayServer {
    /// The root windows of every screen, in server order.
    fn screens(&self) -> Vec<WindowId>;

    /// The outputs belonging to a screen.
    ///
    /// # Errors
    ///
    /// Returns [`BacklightError::ScreenResources`] if the server refuses the
    /// request or sends no reply.
    fn screen_outputs(&self, root: WindowId) -> Result<Vec<OutputDescriptor>, BacklightError>;

    /// The valid backlight range of an output, if it reports exactly two
    /// bounds.
    fn get_range(&self, output: OutputId) -> Option<Range>;

    /// The current backlight value of an output, if it holds a single 32-bit
    /// integer.
    fn get_value(&self, output: OutputId) -> Option<i32>;

    /// Replaces the backlight value of an output. No reply is awaited.
    fn set_value(&self, output: OutputId, value: i32);

    /// Blocks until every request sent so far has been processed.
    fn sync(&self);
}

#[cfg(test)]
pub(crate) mod fake {
    //! An in-memory [`DisplayServer`] for tests.

    use std::{cell::RefCell, collections::HashMap};

    use super::*;

    #[derive(Default)]
    pub(crate) struct FakeServer {
        pub(crate) screens: Vec<(WindowId, Vec<OutputDescriptor>)>,
        pub(crate) ranges: HashMap<OutputId, Range>,
        pub(crate) failing_screens: Vec<WindowId>,
        /// Values as seen by readers, i.e. after the last sync.
        pub(crate) values: RefCell<HashMap<OutputId, i32>>,
        pub(crate) pending: RefCell<Vec<(OutputId, i32)>>,
        pub(crate) writes: RefCell<Vec<(OutputId, i32)>>,
        pub(crate) syncs: RefCell<usize>,
    }

    impl FakeServer {
        /// A single screen whose outputs have the given `(min, max, value)`.
        pub(crate) fn with_outputs(outputs: &[(i32, i32, i32)]) -> Self {
            let mut server = Self::default();
            server.add_screen(1, outputs);
            server
        }

        pub(crate) fn add_screen(&mut self, root: u32, outputs: &[(i32, i32, i32)]) {
            let base = root * 100;
            let mut descriptors = Vec::new();
            for (i, &(min, max, value)) in outputs.iter().enumerate() {
                let id = OutputId(base + i as u32);
                descriptors.push(OutputDescriptor {
                    id,
                    name: format!("OUT-{}", i),
                });
                self.ranges.insert(id, Range::new(min, max));
                self.values.borrow_mut().insert(id, value);
            }
            self.screens.push((WindowId(root), descriptors));
        }

        /// Simulates a change made by another client.
        pub(crate) fn set_external(&self, output: OutputId, value: i32) {
            self.values.borrow_mut().insert(output, value);
        }

        pub(crate) fn value(&self, output: OutputId) -> Option<i32> {
            self.values.borrow().get(&output).copied()
        }
    }

    impl DisplayServer for FakeServer {
        fn screens(&self) -> Vec<WindowId> {
            self.screens.iter().map(|(root, _)| *root).collect()
        }

        fn screen_outputs(&self, root: WindowId) -> Result<Vec<OutputDescriptor>, BacklightError> {
            if self.failing_screens.contains(&root) {
                return Err(BacklightError::ScreenResources { code: 8 });
            }
            Ok(self
                .screens
                .iter()
                .find(|(r, _)| *r == root)
                .map(|(_, outputs)| outputs.clone())
                .unwrap_or_default())
        }

        fn get_range(&self, output: OutputId) -> Option<Range> {
            self.ranges.get(&output).copied()
        }

        fn get_value(&self, output: OutputId) -> Option<i32> {
            self.value(output)
        }

        fn set_value(&self, output: OutputId, value: i32) {
            self.pending.borrow_mut().push((output, value));
            self.writes.borrow_mut().push((output, value));
        }

        fn sync(&self) {
            *self.syncs.borrow_mut() += 1;
            let mut values = self.values.borrow_mut();
            for (output, value) in self.pending.borrow_mut().drain(..) {
                values.insert(output, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fake::FakeServer, *};

    #[test]
    fn test_range_validity() {
        assert!(Range::new(0, 1000).is_valid());
        assert!(Range::new(-5, 10).is_valid());
        assert!(!Range::new(0, 0).is_valid());
        assert!(!Range::new(-10, -1).is_valid());
        assert!(!Range::new(10, 10).is_valid());
        assert!(!Range::new(20, 10).is_valid());
    }

    #[test]
    fn test_step_is_five_percent() {
        assert_eq!(Range::new(0, 1000).step(), 50);
        assert_eq!(Range::new(100, 1100).step(), 50);
        assert_eq!(Range::new(0, 255).step(), 12);
    }

    #[test]
    fn test_step_never_zero() {
        assert_eq!(Range::new(0, 7).step(), 1);
    }

    #[test]
    fn test_decile() {
        let range = Range::new(0, 1000);
        assert_eq!(range.decile(0), 0);
        assert_eq!(range.decile(3), 300);
        assert_eq!(range.decile(9), 900);

        let offset = Range::new(100, 1100);
        assert_eq!(offset.decile(5), 600);
    }

    #[test]
    fn test_decile_keeps_precision_on_uneven_span() {
        let range = Range::new(0, 937);
        let deciles: Vec<i32> = (0..=9).map(|d| range.decile(d)).collect();
        assert_eq!(deciles, [0, 93, 187, 281, 374, 468, 562, 655, 749, 843]);

        assert_eq!(Range::new(3, 940).decile(5), 471);
    }

    #[test]
    fn test_offset_clamps() {
        let range = Range::new(0, 1000);
        assert_eq!(range.offset(950, 100), 1000);
        assert_eq!(range.offset(50, -100), 0);
        assert_eq!(range.offset(i32::MAX, 1), 1000);
    }

    #[test]
    fn test_percent() {
        let range = Range::new(0, 937);
        assert_eq!(range.percent(937), 100);
        assert_eq!(range.percent(0), 0);
        assert_eq!(range.percent(468), 49);
    }

    #[test]
    fn test_write_visible_after_sync() {
        let server = FakeServer::with_outputs(&[(0, 1000, 100)]);
        let output = OutputId(100);

        server.set_value(output, 400);
        assert_eq!(server.get_value(output), Some(100));

        server.sync();
        assert_eq!(server.get_value(output), Some(400));
    }
}
