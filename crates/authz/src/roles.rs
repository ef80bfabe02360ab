//! Roles, role ranks, and the role → base-permission contract.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::PermissionCode;

/// Role identifier.
///
/// Roles are opaque strings at this layer (`"MANAGER"`); the base permission
/// set for a role comes from a [`RoleDirectory`], and the administrative
/// rank comes from [`RoleRanks`]. Roles do not contain each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a role to the permission codes it grants by default.
///
/// Read-only dependency of the engine; unknown roles yield the empty set.
pub trait RoleDirectory {
    fn base_permissions(&self, role: &Role) -> HashSet<PermissionCode>;
}

/// Immutable role seniority table.
///
/// Rank gates administrative mutation of other grants only; it never feeds
/// permission inheritance. Loaded once at process start and passed by
/// reference. Unknown role names rank as 0 and are always dominated.
#[derive(Debug, Clone)]
pub struct RoleRanks {
    ranks: HashMap<String, i32>,
}

impl RoleRanks {
    pub fn new(ranks: HashMap<String, i32>) -> Self {
        Self { ranks }
    }

    /// The deployment's standard seniority table.
    pub fn builtin() -> Self {
        let mut ranks = HashMap::new();
        ranks.insert("OWNER".to_string(), 100);
        ranks.insert("ADMIN".to_string(), 80);
        ranks.insert("MANAGER".to_string(), 50);
        ranks.insert("CASHIER".to_string(), 10);
        ranks.insert("WAREHOUSE".to_string(), 10);
        Self { ranks }
    }

    pub fn rank(&self, role: &Role) -> i32 {
        self.ranks.get(role.as_str()).copied().unwrap_or(0)
    }
}
