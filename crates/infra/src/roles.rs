//! In-memory role → base-permission directory.

use std::collections::{HashMap, HashSet};

use tillworks_authz::{PermissionCatalog, PermissionCode, Role, RoleDirectory};

/// In-memory role base-permission map.
///
/// Production deployments load their map from persistence; this one backs
/// tests and local development. Unknown roles yield the empty set.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRoleDirectory {
    map: HashMap<String, HashSet<PermissionCode>>,
}

impl InMemoryRoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: &str, codes: impl IntoIterator<Item = PermissionCode>) -> Self {
        self.map.insert(role.to_string(), codes.into_iter().collect());
        self
    }

    /// Default seed for the standard roles.
    ///
    /// OWNER holds the full catalog; ADMIN everything except
    /// `admin:full_access`; MANAGER the operational day-to-day set; CASHIER
    /// the point-of-sale set; WAREHOUSE the inventory set.
    pub fn builtin(catalog: &PermissionCatalog) -> Self {
        let all: HashSet<PermissionCode> = catalog.iter().map(|e| e.code.clone()).collect();
        let full_access = PermissionCode::new("admin:full_access");

        let admin: HashSet<PermissionCode> =
            all.iter().filter(|c| **c != full_access).cloned().collect();

        let manager = codes(&[
            "organization:store:view",
            "product:view",
            "product:create",
            "product:update",
            "inventory:view",
            "inventory:create",
            "inventory:update",
            "employee:view",
            "customer:view",
            "customer:create",
            "customer:update",
            "sale:view",
            "sale:create",
            "sale:refund",
            "device:view",
            "report:view",
        ]);

        let cashier = codes(&["product:view", "customer:view", "sale:view", "sale:create"]);

        let warehouse = codes(&[
            "product:view",
            "inventory:view",
            "inventory:create",
            "inventory:update",
        ]);

        Self::new()
            .with_role("OWNER", all)
            .with_role("ADMIN", admin)
            .with_role("MANAGER", manager)
            .with_role("CASHIER", cashier)
            .with_role("WAREHOUSE", warehouse)
    }
}

fn codes(list: &[&'static str]) -> HashSet<PermissionCode> {
    list.iter().map(|c| PermissionCode::new(*c)).collect()
}

impl RoleDirectory for InMemoryRoleDirectory {
    fn base_permissions(&self, role: &Role) -> HashSet<PermissionCode> {
        self.map.get(role.as_str()).cloned().unwrap_or_default()
    }
}
