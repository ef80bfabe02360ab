//! Grant administration: the only write path of the engine.
//!
//! Reads (matrix, summaries) go straight to the store; mutation is
//! validate-then-write behind the [`SecurityGuard`], all-or-nothing.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use tillworks_core::{EmployeeId, GrantId, ResourceId, Scope};

use crate::catalog::{PermissionCatalog, PermissionCode};
use crate::error::AuthzError;
use crate::grant::AccessGrant;
use crate::guard::{ActorContext, SecurityGuard};
use crate::hierarchy::HierarchyResolver;
use crate::matrix::{calculate_matrix, GrantMatrix};
use crate::roles::{Role, RoleDirectory};
use crate::store::{GrantStore, GrantUpdate};

/// Requested new state for a grant's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGrantRequest {
    pub role: Role,
    pub extra_permissions: HashSet<PermissionCode>,
    pub excluded_permissions: HashSet<PermissionCode>,
}

/// Listing row for administration UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSummary {
    pub id: GrantId,
    pub scope: Scope,
    pub target_id: ResourceId,
    pub role: Role,
    pub extras_count: usize,
    pub excluded_count: usize,
}

/// Effective permissions of an employee, grouped scope → target → codes.
pub type EmployeePermissionMatrix = BTreeMap<Scope, BTreeMap<ResourceId, Vec<PermissionCode>>>;

/// Administration entry point over the grant store.
pub struct GrantAdministration<'a> {
    store: &'a dyn GrantStore,
    hierarchy: &'a dyn HierarchyResolver,
    roles: &'a dyn RoleDirectory,
    catalog: &'a PermissionCatalog,
    guard: SecurityGuard,
}

impl<'a> GrantAdministration<'a> {
    pub fn new(
        store: &'a dyn GrantStore,
        hierarchy: &'a dyn HierarchyResolver,
        roles: &'a dyn RoleDirectory,
        catalog: &'a PermissionCatalog,
        guard: SecurityGuard,
    ) -> Self {
        Self {
            store,
            hierarchy,
            roles,
            catalog,
            guard,
        }
    }

    /// The full permission matrix of one grant, for rendering/editing.
    pub fn grant_matrix(&self, grant_id: GrantId) -> Result<GrantMatrix, AuthzError> {
        let grant = self.store.load(grant_id)?;
        let base = self.roles.base_permissions(&grant.role);
        Ok(calculate_matrix(self.catalog, &base, grant_id, &grant))
    }

    /// Grant summaries for one employee.
    pub fn employee_grants(&self, employee_id: EmployeeId) -> Result<Vec<GrantSummary>, AuthzError> {
        Ok(self
            .store
            .grants_for_employee(employee_id)?
            .into_iter()
            .map(|(id, g)| GrantSummary {
                id,
                scope: g.scope,
                target_id: g.target_id,
                role: g.role,
                extras_count: g.extra_permissions.len(),
                excluded_count: g.excluded_permissions.len(),
            })
            .collect())
    }

    /// Mutate a grant's role and overrides, guarded and all-or-nothing.
    pub fn update_grant(
        &self,
        grant_id: GrantId,
        request: UpdateGrantRequest,
        actor: &ActorContext,
    ) -> Result<(), AuthzError> {
        let target = self.store.load(grant_id)?;

        // Can the actor touch this grant at all?
        self.guard
            .validate_scope_access(actor, target.scope, target.target_id, self.hierarchy)?;

        // Rank against the current role and the proposed one.
        self.guard.validate_hierarchy(&actor.role, &target.role)?;
        self.guard.validate_hierarchy(&actor.role, &request.role)?;

        // Only what is newly added as extra needs the escalation check.
        let added: HashSet<PermissionCode> = request
            .extra_permissions
            .difference(&target.extra_permissions)
            .cloned()
            .collect();
        if !added.is_empty() {
            let actor_permissions = actor.effective_permissions_at(
                target.target_id,
                target.scope,
                self.hierarchy,
                self.roles,
            );
            self.guard
                .validate_privilege_escalation(&actor_permissions, &added)?;
        }

        self.store.update(
            grant_id,
            GrantUpdate {
                role: request.role.clone(),
                extra_permissions: request.extra_permissions,
                excluded_permissions: request.excluded_permissions,
            },
        )?;

        tracing::info!(
            grant = %grant_id,
            actor = %actor.employee_id,
            role = %request.role,
            "grant updated"
        );
        Ok(())
    }

    /// Replace all grants of an employee (onboarding/reassignment sync).
    ///
    /// Every incoming grant passes the same guard checks as an update; any
    /// failure aborts the whole sync before the store is touched.
    pub fn sync_employee_grants(
        &self,
        employee_id: EmployeeId,
        grants: Vec<AccessGrant>,
        actor: &ActorContext,
    ) -> Result<Vec<GrantId>, AuthzError> {
        for grant in &grants {
            if grant.employee_id != employee_id {
                return Err(AuthzError::invariant(
                    "sync payload contains a grant for a different employee",
                ));
            }
            self.guard
                .validate_scope_access(actor, grant.scope, grant.target_id, self.hierarchy)?;
            self.guard.validate_hierarchy(&actor.role, &grant.role)?;

            if !grant.extra_permissions.is_empty() {
                let actor_permissions = actor.effective_permissions_at(
                    grant.target_id,
                    grant.scope,
                    self.hierarchy,
                    self.roles,
                );
                self.guard
                    .validate_privilege_escalation(&actor_permissions, &grant.extra_permissions)?;
            }
        }

        // The actor must also outrank whoever the employee currently is,
        // grant by grant, before replacing anything.
        let current = self.store.grants_for_employee(employee_id)?;
        for (_, existing) in &current {
            self.guard.validate_hierarchy(&actor.role, &existing.role)?;
        }

        let ids = self.store.replace_for_employee(employee_id, grants)?;
        tracing::info!(
            employee = %employee_id,
            actor = %actor.employee_id,
            count = ids.len(),
            "employee grants replaced"
        );
        Ok(ids)
    }

    /// Effective permissions of an employee grouped by scope and target,
    /// honoring overrides (one canonical evaluation everywhere).
    pub fn employee_permission_matrix(
        &self,
        employee_id: EmployeeId,
    ) -> Result<EmployeePermissionMatrix, AuthzError> {
        let grants = self.store.grants_for_employee(employee_id)?;

        let mut matrix: EmployeePermissionMatrix = BTreeMap::new();
        for (_, grant) in &grants {
            let base = self.roles.base_permissions(&grant.role);
            let mut effective: Vec<PermissionCode> =
                grant.effective_permissions(&base).into_iter().collect();
            effective.sort();

            matrix
                .entry(grant.scope)
                .or_default()
                .entry(grant.target_id)
                .or_default()
                .extend(effective);
        }

        // An employee can hold several grants on the same target; keep the
        // code list sorted and unique.
        for targets in matrix.values_mut() {
            for codes in targets.values_mut() {
                codes.sort();
                codes.dedup();
            }
        }
        Ok(matrix)
    }
}
