//! Permission catalog: the closed set of permission codes, grouped by module.
//!
//! The catalog is static reference data, versioned by deployment, not by
//! tenant. Convention for codes: `domain[:entity]:action`.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. `"sale:refund"`). The
/// engine never interprets the code beyond equality; grouping comes from the
/// catalog entry's [`Module`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionCode(Cow<'static, str>);

impl PermissionCode {
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Module grouping label for catalog entries (e.g. `SALE`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Module(Cow<'static, str>);

impl Module {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One catalog row: a permission code with its display name and module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: PermissionCode,
    pub name: String,
    pub module: Module,
}

impl CatalogEntry {
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        name: impl Into<String>,
        module: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: PermissionCode::new(code),
            name: name.into(),
            module: Module::new(module),
        }
    }
}

/// The closed, ordered permission catalog.
///
/// Entries are kept sorted by (module, name); iteration order is the order
/// the matrix calculator emits rows in. Lookups by code are O(1).
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    entries: Vec<CatalogEntry>,
    by_code: HashMap<PermissionCode, usize>,
}

impl PermissionCatalog {
    /// Build a catalog from entries.
    ///
    /// Entries are sorted by (module, name). Duplicate codes are collapsed,
    /// first occurrence wins; the catalog is closed reference data so this
    /// only matters for hand-built test catalogs.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut sorted = entries;
        sorted.sort_by(|a, b| (&a.module, &a.name).cmp(&(&b.module, &b.name)));

        let mut by_code = HashMap::with_capacity(sorted.len());
        let mut deduped = Vec::with_capacity(sorted.len());
        for entry in sorted {
            if by_code.contains_key(&entry.code) {
                continue;
            }
            by_code.insert(entry.code.clone(), deduped.len());
            deduped.push(entry);
        }

        Self {
            entries: deduped,
            by_code,
        }
    }

    /// The production permission set shipped with the deployment.
    pub fn builtin() -> Self {
        Self::new(vec![
            // Organization / store management
            CatalogEntry::new("organization:store:view", "View stores", "ORGANIZATION"),
            CatalogEntry::new("organization:store:create", "Create stores", "ORGANIZATION"),
            CatalogEntry::new("organization:store:update", "Update stores", "ORGANIZATION"),
            CatalogEntry::new("organization:store:delete", "Delete stores", "ORGANIZATION"),
            CatalogEntry::new("organization:company:view", "View companies", "ORGANIZATION"),
            CatalogEntry::new("organization:company:create", "Create companies", "ORGANIZATION"),
            CatalogEntry::new("organization:company:update", "Update companies", "ORGANIZATION"),
            CatalogEntry::new("organization:company:delete", "Delete companies", "ORGANIZATION"),
            // Products / catalog
            CatalogEntry::new("product:view", "View products", "PRODUCT"),
            CatalogEntry::new("product:create", "Create products", "PRODUCT"),
            CatalogEntry::new("product:update", "Update products", "PRODUCT"),
            CatalogEntry::new("product:delete", "Delete products", "PRODUCT"),
            // Inventory
            CatalogEntry::new("inventory:view", "View inventory", "INVENTORY"),
            CatalogEntry::new("inventory:create", "Create inventory entries", "INVENTORY"),
            CatalogEntry::new("inventory:update", "Update inventory", "INVENTORY"),
            // Employees
            CatalogEntry::new("employee:view", "View employees", "EMPLOYEE"),
            CatalogEntry::new("employee:create", "Create employees", "EMPLOYEE"),
            CatalogEntry::new("employee:update", "Update employees", "EMPLOYEE"),
            CatalogEntry::new("employee:delete", "Delete employees", "EMPLOYEE"),
            // Customers / CRM
            CatalogEntry::new("customer:view", "View customers", "CUSTOMER"),
            CatalogEntry::new("customer:create", "Create customers", "CUSTOMER"),
            CatalogEntry::new("customer:update", "Update customers", "CUSTOMER"),
            CatalogEntry::new("customer:delete", "Delete customers", "CUSTOMER"),
            // Sales
            CatalogEntry::new("sale:view", "View sales", "SALE"),
            CatalogEntry::new("sale:create", "Create sales", "SALE"),
            CatalogEntry::new("sale:refund", "Refund sales", "SALE"),
            CatalogEntry::new("sale:void", "Void sales", "SALE"),
            // Devices
            CatalogEntry::new("device:view", "View devices", "DEVICE"),
            CatalogEntry::new("device:manage", "Manage devices", "DEVICE"),
            // Reporting / analytics
            CatalogEntry::new("report:view", "View reports", "REPORT"),
            CatalogEntry::new("report:export", "Export reports", "REPORT"),
            // Marketing
            CatalogEntry::new("marketing:campaign:view", "View campaigns", "MARKETING"),
            CatalogEntry::new("marketing:campaign:launch", "Launch campaigns", "MARKETING"),
            CatalogEntry::new("marketing:email:preview", "Preview campaign emails", "MARKETING"),
            CatalogEntry::new("marketing:template:view", "View templates", "MARKETING"),
            CatalogEntry::new("marketing:template:create", "Create templates", "MARKETING"),
            CatalogEntry::new("marketing:template:edit", "Edit templates", "MARKETING"),
            CatalogEntry::new("marketing:template:delete", "Delete templates", "MARKETING"),
            // Admin
            CatalogEntry::new("admin:full_access", "Full administrative access", "ADMIN"),
        ])
    }

    pub fn contains(&self, code: &PermissionCode) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn get(&self, code: &PermissionCode) -> Option<&CatalogEntry> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in (module, name) order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}
