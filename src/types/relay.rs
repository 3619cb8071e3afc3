// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay commands accepted by the switch.

use std::fmt;

/// A command that changes the relay.
///
/// # Examples
///
/// ```
/// use mystrom_lib::types::RelayCommand;
///
/// assert_eq!(RelayCommand::On.path(), "/relay");
/// assert_eq!(RelayCommand::On.query(), Some(("state", "1")));
/// assert_eq!(RelayCommand::Toggle.path(), "/toggle");
/// assert_eq!(RelayCommand::Toggle.query(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayCommand {
    /// Close the relay.
    On,
    /// Open the relay.
    Off,
    /// Flip the relay.
    Toggle,
}

impl RelayCommand {
    /// Returns the lowercase name used in logs and errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Toggle => "toggle",
        }
    }

    /// Returns the device endpoint that executes this command.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::On | Self::Off => "/relay",
            Self::Toggle => "/toggle",
        }
    }

    /// Returns the query parameter sent with the request, if any.
    #[must_use]
    pub const fn query(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::On => Some(("state", "1")),
            Self::Off => Some(("state", "0")),
            Self::Toggle => None,
        }
    }
}

impl fmt::Display for RelayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for RelayCommand {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_off_query() {
        assert_eq!(RelayCommand::Off.path(), "/relay");
        assert_eq!(RelayCommand::Off.query(), Some(("state", "0")));
    }

    #[test]
    fn relay_from_bool() {
        assert_eq!(RelayCommand::from(true), RelayCommand::On);
        assert_eq!(RelayCommand::from(false), RelayCommand::Off);
    }

    #[test]
    fn relay_display() {
        assert_eq!(RelayCommand::On.to_string(), "on");
        assert_eq!(RelayCommand::Toggle.to_string(), "toggle");
    }
}
