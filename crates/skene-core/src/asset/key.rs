// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

/// The stable, enumerated identifier for one logical content item.
///
/// A key names the *template* ("BasicSoldier"), independent of how many
/// runtime instances are pooled from it. Loaded items are mapped to keys by
/// matching their name string against this set; names that match nothing
/// resolve to the [`End`](ContentKey::End) sentinel and are dropped by the
/// caching layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKey {
    /// The baseline infantry unit.
    BasicSoldier,
    /// The slow, high-damage infantry unit.
    HeavyGunner,
    /// The support unit that heals nearby allies.
    FieldMedic,
    /// The stage-end boss unit.
    Boss,
    /// Sentinel: "no matching key". Never a valid cache or pool entry.
    End,
}

impl ContentKey {
    /// Every real key, in declaration order. Excludes the [`End`](Self::End)
    /// sentinel.
    pub const ALL: [ContentKey; 4] = [
        ContentKey::BasicSoldier,
        ContentKey::HeavyGunner,
        ContentKey::FieldMedic,
        ContentKey::Boss,
    ];

    /// Resolves a loaded item's name string to its key.
    ///
    /// Returns [`End`](Self::End) when the name matches no known key, which
    /// callers treat as "drop this item".
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == name)
            .unwrap_or(ContentKey::End)
    }

    /// The canonical name string for this key, as it appears in content
    /// item names.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKey::BasicSoldier => "BasicSoldier",
            ContentKey::HeavyGunner => "HeavyGunner",
            ContentKey::FieldMedic => "FieldMedic",
            ContentKey::Boss => "Boss",
            ContentKey::End => "End",
        }
    }

    /// Returns `true` for the [`End`](Self::End) sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, ContentKey::End)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_round_trips_every_key() {
        for key in ContentKey::ALL {
            assert_eq!(ContentKey::from_name(key.as_str()), key);
        }
    }

    #[test]
    fn unknown_names_resolve_to_sentinel() {
        assert_eq!(ContentKey::from_name("NoSuchUnit"), ContentKey::End);
        assert_eq!(ContentKey::from_name(""), ContentKey::End);
        assert!(ContentKey::from_name("basicsoldier").is_sentinel());
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(ContentKey::BasicSoldier.to_string(), "BasicSoldier");
    }
}
