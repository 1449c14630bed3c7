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

//! Error types.
//!
//! Only failures that stop the application are represented here. Steady-state
//! property read and write anomalies never surface as errors, they degrade to
//! "value unchanged" or "output excluded" inside the protocol layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum BacklightError {
    /// The display server could not be reached at all.
    #[error("Failed to connect to the display server: {0}")]
    Connect(#[from] x11rb::errors::ConnectError),

    /// The connection broke while sending a request.
    #[error("Display server connection error: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),

    /// Screen resource enumeration failed, the tool cannot operate without it.
    #[error("RANDR Get Screen Resources returned error {code}")]
    ScreenResources { code: i32 },
}
