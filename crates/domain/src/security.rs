use std::collections::BTreeMap;
use std::str::FromStr;

use barberdesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Action a group can be granted on a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// View the screen and list its records.
    Read,
    /// Create new records.
    Write,
    /// Modify existing records.
    Update,
    /// Remove records.
    Delete,
}

impl Capability {
    /// Returns a stable transport value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::Read,
            Capability::Write,
            Capability::Update,
            Capability::Delete,
        ];

        ALL
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown capability value '{value}'"
            ))),
        }
    }
}

/// Four independent capability flags held on one menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Read flag.
    pub read: bool,
    /// Write flag.
    pub write: bool,
    /// Update flag.
    pub update: bool,
    /// Delete flag.
    pub delete: bool,
}

impl CapabilitySet {
    /// Creates a set from explicit flags.
    #[must_use]
    pub fn new(read: bool, write: bool, update: bool, delete: bool) -> Self {
        Self {
            read,
            write,
            update,
            delete,
        }
    }

    /// Returns a set with every flag enabled.
    #[must_use]
    pub fn full() -> Self {
        Self::new(true, true, true, true)
    }

    /// Returns whether the flag for `capability` is set.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.read,
            Capability::Write => self.write,
            Capability::Update => self.update,
            Capability::Delete => self.delete,
        }
    }

    /// Returns the per-flag logical OR of both sets.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            read: self.read || other.read,
            write: self.write || other.write,
            update: self.update || other.update,
            delete: self.delete || other.delete,
        }
    }

    /// Returns true when no flag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.read || self.write || self.update || self.delete)
    }
}

/// Effective capabilities keyed by menu path.
///
/// Only menus with at least one granted flag are ever present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionMap(BTreeMap<String, CapabilitySet>);

impl PermissionMap {
    /// Creates an empty map (default-deny).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one grant into the map using union-per-flag.
    ///
    /// Grants without any flag set leave the map untouched.
    pub fn grant(&mut self, menu_path: &str, capabilities: CapabilitySet) {
        if capabilities.is_empty() {
            return;
        }

        self.0
            .entry(menu_path.to_owned())
            .and_modify(|existing| *existing = existing.union(capabilities))
            .or_insert(capabilities);
    }

    /// Returns the effective set for a menu path, if any flag is granted.
    #[must_use]
    pub fn get(&self, menu_path: &str) -> Option<CapabilitySet> {
        self.0.get(menu_path).copied()
    }

    /// Returns whether `capability` is granted on `menu_path`.
    #[must_use]
    pub fn allows(&self, menu_path: &str, capability: Capability) -> bool {
        self.get(menu_path)
            .is_some_and(|capabilities| capabilities.allows(capability))
    }

    /// Returns true when the map grants nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of menus with at least one granted flag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over menu paths and their effective sets in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, CapabilitySet)> {
        self.0
            .iter()
            .map(|(path, capabilities)| (path.as_str(), *capabilities))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{Capability, CapabilitySet, PermissionMap};

    fn capability_set() -> impl Strategy<Value = CapabilitySet> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(read, write, update, delete)| {
                CapabilitySet::new(read, write, update, delete)
            })
    }

    #[test]
    fn capability_roundtrip_storage_value() {
        for capability in Capability::all() {
            let restored = Capability::from_str(capability.as_str());
            assert_eq!(restored.ok(), Some(*capability));
        }
    }

    #[test]
    fn unknown_capability_is_rejected() {
        assert!(Capability::from_str("approve").is_err());
    }

    #[test]
    fn grants_from_two_groups_are_unioned_per_flag() {
        let mut permissions = PermissionMap::new();
        permissions.grant("/dashboard/services", CapabilitySet::new(true, false, false, false));
        permissions.grant("/dashboard/services", CapabilitySet::new(false, true, false, false));

        assert_eq!(
            permissions.get("/dashboard/services"),
            Some(CapabilitySet::new(true, true, false, false))
        );
    }

    #[test]
    fn empty_grant_is_omitted() {
        let mut permissions = PermissionMap::new();
        permissions.grant("/dashboard/products", CapabilitySet::default());

        assert!(permissions.is_empty());
        assert!(!permissions.allows("/dashboard/products", Capability::Read));
    }

    proptest! {
        #[test]
        fn union_never_drops_a_flag(left in capability_set(), right in capability_set()) {
            let merged = left.union(right);
            for capability in Capability::all() {
                prop_assert_eq!(
                    merged.allows(*capability),
                    left.allows(*capability) || right.allows(*capability)
                );
            }
        }

        #[test]
        fn grant_order_does_not_change_result(
            sets in proptest::collection::vec(capability_set(), 0..8)
        ) {
            let mut forward = PermissionMap::new();
            for set in &sets {
                forward.grant("/dashboard/users", *set);
            }

            let mut backward = PermissionMap::new();
            for set in sets.iter().rev() {
                backward.grant("/dashboard/users", *set);
            }

            prop_assert_eq!(forward, backward);
        }
    }
}
