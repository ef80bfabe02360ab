//! Request-time authorization decision path.
//!
//! Answers "does employee E have permission P on resource R" by testing every
//! grant the employee holds against the scope cascade and the grant's
//! effective permission set. Grants are additive: one applicable grant whose
//! effective set contains the code is enough, and no grant can restrict
//! another.

use tillworks_core::{EmployeeId, ResourceId, Scope};

use crate::catalog::PermissionCode;
use crate::error::AuthzError;
use crate::grant::AccessGrant;
use crate::hierarchy::{Ancestors, HierarchyResolver};
use crate::roles::RoleDirectory;
use crate::store::GrantStore;

/// Scope applicability of one grant to one checked resource.
///
/// A grant applies iff its scope is the same or broader than the checked
/// scope *and* its target matches the checked resource or the corresponding
/// resolved ancestor:
///
/// - ORGANIZATION grant: target equals the checked resource (organization
///   check) or the organization ancestor (company/store check).
/// - COMPANY grant: target equals the checked resource (company check) or
///   the company ancestor (store check). Never applicable to an
///   organization-scope check.
/// - STORE grant: exact id match on a store-scope check only.
///
/// Missing ancestors (unknown id) never match, so malformed targets deny.
pub fn grant_covers(
    grant: &AccessGrant,
    target_id: ResourceId,
    target_scope: Scope,
    ancestors: &Ancestors,
) -> bool {
    if !grant.scope.covers(target_scope) {
        return false;
    }

    match grant.scope {
        Scope::Organization => {
            let organization = if target_scope == Scope::Organization {
                Some(target_id)
            } else {
                ancestors.organization_id
            };
            organization == Some(grant.target_id)
        }
        Scope::Company => {
            let company = if target_scope == Scope::Company {
                Some(target_id)
            } else {
                ancestors.company_id
            };
            company == Some(grant.target_id)
        }
        // covers() already restricted the checked scope to STORE.
        Scope::Store => grant.target_id == target_id,
    }
}

/// The canonical permission evaluator.
///
/// Read-only and side-effect free; safe for unbounded concurrent use. Always
/// honors the full override semantics (role base ∪ extra, minus excluded);
/// there is exactly one evaluation algorithm in the system.
pub struct AuthorizationEvaluator<'a> {
    grants: &'a dyn GrantStore,
    hierarchy: &'a dyn HierarchyResolver,
    roles: &'a dyn RoleDirectory,
}

impl<'a> AuthorizationEvaluator<'a> {
    pub fn new(
        grants: &'a dyn GrantStore,
        hierarchy: &'a dyn HierarchyResolver,
        roles: &'a dyn RoleDirectory,
    ) -> Self {
        Self {
            grants,
            hierarchy,
            roles,
        }
    }

    /// Decide whether `employee_id` holds `code` on `target_id` at
    /// `target_scope`.
    ///
    /// Empty grant list and unknown permission codes evaluate to `false`,
    /// never to an error; only a failing grant read surfaces as
    /// [`AuthzError::Storage`].
    pub fn has_permission(
        &self,
        employee_id: EmployeeId,
        code: &PermissionCode,
        target_id: ResourceId,
        target_scope: Scope,
    ) -> Result<bool, AuthzError> {
        let grants = self.grants.grants_for_employee(employee_id)?;
        if grants.is_empty() {
            return Ok(false);
        }

        let ancestors = self.hierarchy.ancestors_of(target_id, target_scope);

        for (_, grant) in &grants {
            if !grant_covers(grant, target_id, target_scope, &ancestors) {
                continue;
            }
            let base = self.roles.base_permissions(&grant.role);
            if grant.effective_permissions(&base).contains(code) {
                tracing::debug!(
                    employee = %employee_id,
                    permission = %code,
                    target = %target_id,
                    scope = %target_scope,
                    grant_scope = %grant.scope,
                    "permission granted"
                );
                return Ok(true);
            }
        }

        tracing::debug!(
            employee = %employee_id,
            permission = %code,
            target = %target_id,
            scope = %target_scope,
            "permission denied"
        );
        Ok(false)
    }

    /// Boolean facade for protected operations.
    ///
    /// Storage failures are logged and denied: the caller contract is a hard
    /// boolean and evaluation must fail closed, never surface as "allow".
    pub fn authorize(
        &self,
        employee_id: EmployeeId,
        code: &PermissionCode,
        target_id: ResourceId,
        target_scope: Scope,
    ) -> bool {
        match self.has_permission(employee_id, code, target_id, target_scope) {
            Ok(decision) => decision,
            Err(err) => {
                tracing::error!(
                    employee = %employee_id,
                    permission = %code,
                    error = %err,
                    "authorization check failed, denying"
                );
                false
            }
        }
    }
}
