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

//! RandR output property access.
//!
//! Implements [`DisplayServer`] with an `x11rb` connection to the default
//! display. The backlight is the per-output `Backlight` property (or the
//! older `BACKLIGHT` spelling) exposed by the RandR extension.

use tracing::{debug, info, warn};
use x11rb::{
    connection::Connection,
    errors::ReplyError,
    protocol::{
        randr::ConnectionExt as RandrConnectionExt,
        xproto::{AtomEnum, ConnectionExt as XprotoConnectionExt, PropMode},
    },
    rust_connection::RustConnection,
};

use crate::{
    error::BacklightError,
    protocol::{
        DEFAULT_OUTPUT_NAME, DisplayServer, OutputDescriptor, OutputId, PropertyId, Range,
        WindowId,
    },
};

/// Minimum RandR version with output properties.
const RANDR_MAJOR: u32 = 1;
const RANDR_MINOR: u32 = 2;

/// Backlight control through RandR output properties.
pub(crate) struct X11Backlight {
    conn: RustConnection,
    backlight: Option<PropertyId>,
}

impl X11Backlight {
    /// Connects to the default display and resolves the backlight property.
    ///
    /// A missing backlight property is not an error, every output will simply
    /// report no range and be excluded by discovery.
    ///
    /// # Arguments
    ///
    /// * `property_names` - Candidate property names, tried in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be opened.
    pub(crate) fn connect(property_names: &[String]) -> Result<Self, BacklightError> {
        let (conn, _) = RustConnection::connect(None)?;

        match conn
            .randr_query_version(RANDR_MAJOR, RANDR_MINOR)
            .map_err(ReplyError::from)
            .and_then(|cookie| cookie.reply())
        {
            Ok(version) => info!(
                "RandR version {}.{}",
                version.major_version, version.minor_version
            ),
            Err(e) => warn!("RandR version query failed: {}", e),
        }

        let backlight = resolve_backlight_property(&conn, property_names);
        match backlight {
            Some(property) => debug!("Backlight property resolved to atom {}", property.0),
            None => warn!(
                "No backlight property found, tried {}",
                property_names.join(", ")
            ),
        }

        Ok(Self { conn, backlight })
    }
}

/// Resolves the first of `names` that exists on the server.
///
/// All intern requests are sent before any reply is read, so resolution costs
/// a single round trip. Atoms are never created.
pub(crate) fn resolve_backlight_property(
    conn: &impl Connection,
    names: &[String],
) -> Option<PropertyId> {
    let cookies: Vec<_> = names
        .iter()
        .map(|name| conn.intern_atom(true, name.as_bytes()))
        .collect();

    for cookie in cookies {
        let Ok(cookie) = cookie else { continue };
        match cookie.reply() {
            Ok(reply) if reply.atom != x11rb::NONE => return Some(PropertyId(reply.atom)),
            Ok(_) => {}
            Err(e) => debug!("Failed to intern backlight atom: {}", e),
        }
    }

    None
}

/// Extracts the X11 error code from a failed reply, or `-1` if the connection
/// itself failed.
fn error_code(error: &ReplyError) -> i32 {
    match error {
        ReplyError::X11Error(e) => i32::from(e.error_code),
        ReplyError::ConnectionError(_) => -1,
    }
}

impl DisplayServer for X11Backlight {
    fn screens(&self) -> Vec<WindowId> {
        self.conn
            .setup()
            .roots
            .iter()
            .map(|screen| WindowId(screen.root))
            .collect()
    }

    fn screen_outputs(&self, root: WindowId) -> Result<Vec<OutputDescriptor>, BacklightError> {
        let resources = self
            .conn
            .randr_get_screen_resources(root.0)?
            .reply()
            .map_err(|e| BacklightError::ScreenResources {
                code: error_code(&e),
            })?;

        // Names are cosmetic, so a failed info request just leaves the
        // default label.
        let cookies: Vec<_> = resources
            .outputs
            .iter()
            .map(|&output| {
                self.conn
                    .randr_get_output_info(output, resources.config_timestamp)
            })
            .collect();

        let descriptors = resources
            .outputs
            .iter()
            .zip(cookies)
            .map(|(&output, cookie)| {
                let name = cookie
                    .ok()
                    .and_then(|cookie| cookie.reply().ok())
                    .map(|info| String::from_utf8_lossy(&info.name).into_owned())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string());
                OutputDescriptor {
                    id: OutputId(output),
                    name,
                }
            })
            .collect();

        Ok(descriptors)
    }

    fn get_range(&self, output: OutputId) -> Option<Range> {
        let backlight = self.backlight?;
        let reply = self
            .conn
            .randr_query_output_property(output.0, backlight.0)
            .ok()?
            .reply()
            .ok()?;

        match reply.valid_values.as_slice() {
            &[min, max] if reply.range => Some(Range::new(min, max)),
            _ => None,
        }
    }

    fn get_value(&self, output: OutputId) -> Option<i32> {
        let backlight = self.backlight?;
        let reply = self
            .conn
            .randr_get_output_property(output.0, backlight.0, AtomEnum::NONE, 0, 4, false, false)
            .ok()?
            .reply()
            .ok()?;

        if reply.type_ != u32::from(AtomEnum::INTEGER) || reply.format != 32 || reply.num_items != 1
        {
            return None;
        }

        let bytes: [u8; 4] = reply.data.get(..4)?.try_into().ok()?;
        Some(i32::from_ne_bytes(bytes))
    }

    fn set_value(&self, output: OutputId, value: i32) {
        let Some(backlight) = self.backlight else {
            return;
        };
        let data = value.to_ne_bytes();
        match self.conn.randr_change_output_property(
            output.0,
            backlight.0,
            AtomEnum::INTEGER.into(),
            32,
            PropMode::REPLACE,
            1,
            &data,
        ) {
            Ok(cookie) => cookie.ignore_error(),
            Err(e) => debug!("Failed to write backlight of output {}: {}", output.0, e),
        }
    }

    fn sync(&self) {
        // Replies arrive in order, so any reply means earlier requests are done
        let result = self
            .conn
            .get_input_focus()
            .map_err(ReplyError::from)
            .and_then(|cookie| cookie.reply());
        if let Err(e) = result {
            debug!("Display server sync failed: {}", e);
        }
    }
}
