//! Permission matrix calculation for administration UIs.
//!
//! The matrix is the full enumerated view of a grant's effective permissions:
//! every catalog code exactly once, grouped by module in catalog order, each
//! row annotated with whether it is granted and where the decision came from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use tillworks_core::GrantId;

use crate::catalog::{Module, PermissionCatalog, PermissionCode};
use crate::grant::AccessGrant;
use crate::roles::Role;

/// Provenance of a matrix row's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionSource {
    /// Granted (or excluded-but-present) via the role base set.
    Role,
    /// Granted additively beyond the role base.
    Extra,
    /// Excluded without ever being in the role base.
    Excluded,
    /// Not granted by anything.
    None,
}

/// One matrix row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRow {
    pub code: PermissionCode,
    pub name: String,
    pub value: bool,
    pub source: PermissionSource,
}

/// All rows of one module, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermissions {
    pub module: Module,
    pub permissions: Vec<PermissionRow>,
}

/// The full matrix for one grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantMatrix {
    pub grant_id: GrantId,
    pub role: Role,
    pub modules: Vec<ModulePermissions>,
}

impl GrantMatrix {
    /// All rows across modules, flattened in emission order.
    pub fn rows(&self) -> impl Iterator<Item = &PermissionRow> {
        self.modules.iter().flat_map(|m| m.permissions.iter())
    }

    pub fn row(&self, code: &PermissionCode) -> Option<&PermissionRow> {
        self.rows().find(|r| &r.code == code)
    }
}

/// Compute the matrix for one grant.
///
/// Pure function of (catalog, role base, grant): no I/O, total over the
/// catalog, stable ordering. Decision per code:
///
/// - excluded → `false`, source `ROLE` if the role base had it (a disabled
///   role permission) else `EXCLUDED`;
/// - extra → `true`, source `EXTRA`;
/// - role base → `true`, source `ROLE`;
/// - otherwise → `false`, source `NONE`.
pub fn calculate_matrix(
    catalog: &PermissionCatalog,
    role_base: &HashSet<PermissionCode>,
    grant_id: GrantId,
    grant: &AccessGrant,
) -> GrantMatrix {
    let mut modules: Vec<ModulePermissions> = Vec::new();

    for entry in catalog.iter() {
        let in_role = role_base.contains(&entry.code);
        let in_extra = grant.extra_permissions.contains(&entry.code);
        let in_excluded = grant.excluded_permissions.contains(&entry.code);

        let (value, source) = if in_excluded {
            (
                false,
                if in_role {
                    PermissionSource::Role
                } else {
                    PermissionSource::Excluded
                },
            )
        } else if in_extra {
            (true, PermissionSource::Extra)
        } else if in_role {
            (true, PermissionSource::Role)
        } else {
            (false, PermissionSource::None)
        };

        let row = PermissionRow {
            code: entry.code.clone(),
            name: entry.name.clone(),
            value,
            source,
        };

        match modules.last_mut() {
            Some(last) if last.module == entry.module => last.permissions.push(row),
            _ => modules.push(ModulePermissions {
                module: entry.module.clone(),
                permissions: vec![row],
            }),
        }
    }

    GrantMatrix {
        grant_id,
        role: grant.role.clone(),
        modules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testkit::{codes, grant};
    use tillworks_core::{ResourceId, Scope};

    fn manager_base() -> HashSet<PermissionCode> {
        codes(&["sale:view", "sale:create"])
    }

    #[test]
    fn manager_with_refund_extra_and_create_excluded() {
        let catalog = PermissionCatalog::builtin();
        let g = grant(1, Scope::Store, ResourceId::new(), "MANAGER")
            .with_overrides(codes(&["sale:refund"]), codes(&["sale:create"]));

        let matrix = calculate_matrix(&catalog, &manager_base(), GrantId::new(9), &g);

        let view = matrix.row(&PermissionCode::new("sale:view")).unwrap();
        assert!(view.value);
        assert_eq!(view.source, PermissionSource::Role);

        // Excluded but present in the role base: disabled role permission.
        let create = matrix.row(&PermissionCode::new("sale:create")).unwrap();
        assert!(!create.value);
        assert_eq!(create.source, PermissionSource::Role);

        let refund = matrix.row(&PermissionCode::new("sale:refund")).unwrap();
        assert!(refund.value);
        assert_eq!(refund.source, PermissionSource::Extra);

        // Every other code is (false, NONE).
        for row in matrix.rows() {
            if ["sale:view", "sale:create", "sale:refund"].contains(&row.code.as_str()) {
                continue;
            }
            assert!(!row.value, "{} unexpectedly granted", row.code);
            assert_eq!(row.source, PermissionSource::None, "{}", row.code);
        }
    }

    #[test]
    fn excluded_without_role_base_reports_excluded_source() {
        let catalog = PermissionCatalog::builtin();
        let g = grant(1, Scope::Store, ResourceId::new(), "CASHIER")
            .with_overrides(codes(&[]), codes(&["sale:refund"]));

        let matrix = calculate_matrix(&catalog, &codes(&["sale:view"]), GrantId::new(1), &g);

        let refund = matrix.row(&PermissionCode::new("sale:refund")).unwrap();
        assert!(!refund.value);
        assert_eq!(refund.source, PermissionSource::Excluded);
    }

    #[test]
    fn exclusion_dominates_extra_in_the_matrix() {
        let catalog = PermissionCatalog::builtin();
        let g = grant(1, Scope::Store, ResourceId::new(), "CASHIER")
            .with_overrides(codes(&["sale:refund"]), codes(&["sale:refund"]));

        let matrix = calculate_matrix(&catalog, &codes(&[]), GrantId::new(1), &g);

        let refund = matrix.row(&PermissionCode::new("sale:refund")).unwrap();
        assert!(!refund.value);
        assert_eq!(refund.source, PermissionSource::Excluded);
    }

    #[test]
    fn matrix_is_total_and_stable() {
        let catalog = PermissionCatalog::builtin();
        let g = grant(1, Scope::Company, ResourceId::new(), "MANAGER");

        let matrix = calculate_matrix(&catalog, &manager_base(), GrantId::new(2), &g);

        // Total: one row per catalog code.
        assert_eq!(matrix.rows().count(), catalog.len());
        let mut seen: Vec<&str> = matrix.rows().map(|r| r.code.as_str()).collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);

        // Stable: row order follows catalog order.
        let catalog_codes: Vec<&str> = catalog.iter().map(|e| e.code.as_str()).collect();
        let matrix_codes: Vec<&str> = matrix.rows().map(|r| r.code.as_str()).collect();
        assert_eq!(matrix_codes, catalog_codes);

        // Grouping preserves module order without splitting modules.
        let module_list: Vec<&str> = matrix.modules.iter().map(|m| m.module.as_str()).collect();
        let mut deduped = module_list.clone();
        deduped.dedup();
        assert_eq!(module_list, deduped);
    }

    #[test]
    fn matrix_serializes_with_screaming_snake_sources() {
        let catalog = PermissionCatalog::builtin();
        let g = grant(1, Scope::Store, ResourceId::new(), "MANAGER")
            .with_overrides(codes(&["sale:refund"]), codes(&[]));
        let matrix = calculate_matrix(&catalog, &manager_base(), GrantId::new(3), &g);

        let json = serde_json::to_string(&matrix).unwrap();
        assert!(json.contains("\"EXTRA\""));
        assert!(json.contains("\"NONE\""));
        assert!(json.contains("\"sale:refund\""));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_code_subset() -> impl Strategy<Value = HashSet<PermissionCode>> {
            let all: Vec<&'static str> = vec![
                "sale:view",
                "sale:create",
                "sale:refund",
                "product:view",
                "inventory:update",
                "customer:delete",
            ];
            proptest::collection::hash_set(proptest::sample::select(all), 0..6)
                .prop_map(|set| set.into_iter().map(PermissionCode::new).collect())
        }

        proptest! {
            /// Property: the matrix covers the catalog exactly once for any
            /// combination of role base and overrides, and row values agree
            /// with the effective permission set.
            #[test]
            fn matrix_total_covering(
                base in arb_code_subset(),
                extra in arb_code_subset(),
                excluded in arb_code_subset(),
            ) {
                let catalog = PermissionCatalog::builtin();
                let g = grant(1, Scope::Store, ResourceId::new(), "MANAGER")
                    .with_overrides(extra, excluded);

                let matrix = calculate_matrix(&catalog, &base, GrantId::new(1), &g);
                prop_assert_eq!(matrix.rows().count(), catalog.len());

                let effective = g.effective_permissions(&base);
                for row in matrix.rows() {
                    prop_assert_eq!(row.value, effective.contains(&row.code));
                }
            }
        }
    }
}
