// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware address of a switch, used as its unique id.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A MAC address in the compact upper-case form `AABBCCDDEEFF`.
///
/// DHCP reports addresses with separators (`aa:bb:cc:dd:ee:ff`) while the
/// device's `/info` endpoint reports the compact form. Both parse to the
/// same value.
///
/// # Examples
///
/// ```
/// use mystrom_lib::types::MacAddress;
///
/// let from_dhcp: MacAddress = "a4:cf:12:0b:9e:01".parse().unwrap();
/// let from_info: MacAddress = "A4CF120B9E01".parse().unwrap();
/// assert_eq!(from_dhcp, from_info);
/// assert_eq!(from_dhcp.as_str(), "A4CF120B9E01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress(String);

impl MacAddress {
    /// Returns the compact upper-case form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MacAddress {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.'))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if compact.len() != 12 || !compact.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidMac(s.to_string()));
        }
        Ok(Self(compact))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_accepts_dashes() {
        let mac: MacAddress = "a4-cf-12-0b-9e-01".parse().unwrap();
        assert_eq!(mac.to_string(), "A4CF120B9E01");
    }

    #[test]
    fn mac_rejects_garbage() {
        assert!("not-a-mac".parse::<MacAddress>().is_err());
        assert!("A4CF120B9E".parse::<MacAddress>().is_err());
        assert!("A4CF120B9EZZ".parse::<MacAddress>().is_err());
    }
}
