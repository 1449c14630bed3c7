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

//! Screen and output discovery.
//!
//! Runs once at startup to build the [`Screen`] list. Only outputs that report
//! a usable backlight range are kept, everything else is dropped before the
//! screen is built so output indices are always dense.

use tracing::{debug, info};

use crate::{
    error::BacklightError,
    model::{Output, Screen},
    protocol::{DisplayServer, OutputDescriptor, Range},
};

/// Discovers every screen and its backlight-capable outputs.
///
/// # Errors
///
/// Returns an error as soon as resource enumeration fails for any screen,
/// later screens are not attempted.
pub(crate) fn discover(server: &impl DisplayServer) -> Result<Vec<Screen>, BacklightError> {
    let mut screens = Vec::new();

    for root in server.screens() {
        let descriptors = server.screen_outputs(root)?;
        let total = descriptors.len();

        let outputs: Vec<Output> = descriptors
            .into_iter()
            .filter_map(|descriptor| probe_output(server, descriptor))
            .collect();

        info!(
            "Screen {}: {} of {} outputs have a backlight",
            root.0,
            outputs.len(),
            total
        );

        screens.push(Screen::new(root, outputs));
    }

    Ok(screens)
}

// Queries range then value, returning the output only if its range is usable.
fn probe_output(server: &impl DisplayServer, descriptor: OutputDescriptor) -> Option<Output> {
    let range = server.get_range(descriptor.id);
    let value = server.get_value(descriptor.id);

    match range {
        Some(range) if range.is_valid() => Some(Output::new(
            descriptor.id,
            descriptor.name,
            range,
            value,
        )),
        Some(Range { min, max }) => {
            debug!(
                "Excluding output {} ({}): invalid range {}..{}",
                descriptor.name, descriptor.id.0, min, max
            );
            None
        }
        None => {
            debug!(
                "Excluding output {} ({}): no backlight range",
                descriptor.name, descriptor.id.0
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{OutputId, WindowId, fake::FakeServer};

    #[test]
    fn test_discover_filters_invalid_ranges() {
        let server = FakeServer::with_outputs(&[
            (0, 1000, 500),
            (0, 0, 0),
            (10, 5, 7),
            (-10, -1, -5),
            (0, 255, 128),
        ]);

        let screens = discover(&server).unwrap();

        assert_eq!(screens.len(), 1);
        let ids: Vec<_> = screens[0].outputs().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OutputId(100), OutputId(104)]);
        assert_eq!(screens[0].selected(), 0);
    }

    #[test]
    fn test_discover_excludes_outputs_without_range() {
        let mut server = FakeServer::with_outputs(&[(0, 1000, 500), (0, 1000, 500)]);
        server.ranges.remove(&OutputId(100));

        let screens = discover(&server).unwrap();

        assert_eq!(screens[0].outputs().len(), 1);
        assert_eq!(screens[0].outputs()[0].id, OutputId(101));
    }

    #[test]
    fn test_discovered_values_within_range() {
        let server = FakeServer::with_outputs(&[(0, 100, 150), (20, 100, 3)]);
        server.values.borrow_mut().remove(&OutputId(100));

        let screens = discover(&server).unwrap();

        for output in screens[0].outputs() {
            assert!(output.range.min <= output.value());
            assert!(output.value() <= output.range.max);
        }
        assert_eq!(screens[0].outputs()[1].value(), 20);
    }

    #[test]
    fn test_discover_all_screens() {
        let mut server = FakeServer::with_outputs(&[(0, 10, 5)]);
        server.add_screen(2, &[(0, 20, 5), (0, 30, 5)]);
        server.add_screen(3, &[]);

        let screens = discover(&server).unwrap();

        let counts: Vec<_> = screens.iter().map(|s| s.outputs().len()).collect();
        assert_eq!(counts, vec![1, 2, 0]);
        assert_eq!(screens[1].root, WindowId(2));
    }

    #[test]
    fn test_discover_fails_on_resource_error() {
        let mut server = FakeServer::with_outputs(&[(0, 10, 5)]);
        server.add_screen(2, &[(0, 20, 5)]);
        server.failing_screens.push(WindowId(1));

        let result = discover(&server);

        assert!(matches!(
            result,
            Err(BacklightError::ScreenResources { code: 8 })
        ));
    }
}
