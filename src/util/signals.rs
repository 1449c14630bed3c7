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

//! Termination signal handling.
//!
//! The signal handlers only set a flag. Teardown is never run from signal
//! context, the main loop notices the flag and returns normally so the same
//! cleanup path is used for every kind of exit.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};

/// A shutdown request, raised by a termination signal or by the application
/// itself.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShutdownSignal {
    requested: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Creates a flag that is raised on SIGINT, SIGQUIT and SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if a signal handler cannot be installed.
    pub(crate) fn register() -> io::Result<Self> {
        let signal = Self::default();
        for sig in [SIGINT, SIGQUIT, SIGTERM] {
            signal_hook::flag::register(sig, Arc::clone(&signal.requested))?;
        }
        Ok(signal)
    }

    pub(crate) fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_shared() {
        let signal = ShutdownSignal::default();
        let other = signal.clone();
        assert!(!other.is_requested());

        signal.request();
        assert!(other.is_requested());
    }
}
