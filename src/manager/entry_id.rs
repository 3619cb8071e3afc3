// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Config entry identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one configured switch.
///
/// Assigned when an entry is set up and used as the prefix of every view's
/// unique id.
///
/// # Examples
///
/// ```
/// use mystrom_lib::manager::EntryId;
///
/// let id = EntryId::new();
/// assert_ne!(id, EntryId::new());
/// println!("Entry: {id}");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random entry id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 characters are enough to tell entries apart in logs
        let short = &self.0.simple().to_string()[..8];
        write!(f, "EntryId({short}...)")
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_uuid_keeps_value() {
        let uuid = Uuid::new_v4();
        assert_eq!(EntryId::from(uuid).as_uuid(), uuid);
        assert_eq!(EntryId::from(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn debug_is_shortened() {
        let debug = format!("{:?}", EntryId::new());
        assert!(debug.starts_with("EntryId("));
        assert!(debug.ends_with("...)"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EntryId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: EntryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
