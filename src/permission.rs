//! Resource-keyed tiered permissions and their set algebra
//!
//! Every operation works on each resource independently and never carries
//! between tier nibbles. An absent Permission is `Permission::default()`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{self, PermissionValue, Tier};
use crate::constants::VALUE_MASK;
use crate::resource::{Resource, RESOURCE_COUNT};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Resource, PermissionValue>", into = "BTreeMap<Resource, PermissionValue>")]
pub struct Permission {
    values: [PermissionValue; RESOURCE_COUNT],
}

impl Permission {
    pub const EMPTY: Permission = Permission { values: [0; RESOURCE_COUNT] };

    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Builder: OR the parsed `spec` into `resource`
    pub fn with(mut self, resource: Resource, spec: &str) -> Self {
        self.values[resource.index()] |= codec::parse(spec);
        self
    }

    #[inline]
    pub fn get(&self, resource: Resource) -> PermissionValue {
        self.values[resource.index()]
    }

    #[inline]
    pub fn set(&mut self, resource: Resource, value: PermissionValue) {
        self.values[resource.index()] = value & VALUE_MASK;
    }

    #[inline]
    pub fn add(&mut self, resource: Resource, value: PermissionValue) {
        self.values[resource.index()] |= value & VALUE_MASK;
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// Non-zero entries in resource order
    pub fn iter(&self) -> impl Iterator<Item = (Resource, PermissionValue)> + '_ {
        Resource::ALL
            .iter()
            .map(move |r| (*r, self.get(*r)))
            .filter(|(_, v)| *v != 0)
    }

    fn zip(&self, other: &Permission, f: impl Fn(PermissionValue, PermissionValue) -> PermissionValue) -> Permission {
        let mut out = Permission::EMPTY;
        for (i, v) in out.values.iter_mut().enumerate() {
            *v = f(self.values[i], other.values[i]) & VALUE_MASK;
        }
        out
    }

    /// Per-resource AND
    pub fn intersect(&self, other: &Permission) -> Permission {
        self.zip(other, |a, b| a & b)
    }

    /// Per-resource OR
    pub fn merge(&self, other: &Permission) -> Permission {
        self.zip(other, |a, b| a | b)
    }

    /// Per-resource `self AND NOT other`
    pub fn subtract(&self, other: &Permission) -> Permission {
        self.zip(other, |a, b| a & !b)
    }

    /// Keep only `tier`'s nibble of every resource, unshifted
    pub fn filter_tier(&self, tier: Tier) -> Permission {
        let mut out = *self;
        for v in out.values.iter_mut() {
            *v = codec::tier_filter(tier, *v);
        }
        out
    }

    /// Every bit set in `required` is also set here
    pub fn covers(&self, required: &Permission) -> bool {
        self.values
            .iter()
            .zip(required.values.iter())
            .all(|(have, need)| have & need == *need)
    }
}

pub fn intersect(a: &Permission, b: &Permission) -> Permission {
    a.intersect(b)
}

pub fn merge(a: &Permission, b: &Permission) -> Permission {
    a.merge(b)
}

/// Merge any number of permissions; the empty merge is zero
pub fn merge_all<'a>(items: impl IntoIterator<Item = &'a Permission>) -> Permission {
    items.into_iter().fold(Permission::EMPTY, |acc, p| acc.merge(p))
}

pub fn subtract(a: &Permission, b: &Permission) -> Permission {
    a.subtract(b)
}

pub fn filter_tier(tier: Tier, p: &Permission) -> Permission {
    p.filter_tier(tier)
}

impl Default for Permission {
    fn default() -> Self {
        Permission::EMPTY
    }
}

impl From<BTreeMap<Resource, PermissionValue>> for Permission {
    fn from(map: BTreeMap<Resource, PermissionValue>) -> Self {
        let mut p = Permission::EMPTY;
        for (r, v) in map {
            p.set(r, v);
        }
        p
    }
}

impl From<Permission> for BTreeMap<Resource, PermissionValue> {
    fn from(p: Permission) -> Self {
        p.iter().collect()
    }
}

impl fmt::Debug for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(r, v)| (r.name(), codec::format(v))))
            .finish()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(r, v)| format!("{}={}", r, codec::format(v)))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
