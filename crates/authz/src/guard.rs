//! Grant administration guard.
//!
//! Every grant mutation passes three independent checks: rank (the actor must
//! outrank the subject, before and after the change), scope access (the actor
//! must itself hold a grant covering the target grant's scope/target), and
//! privilege escalation (the actor can never grant a permission it does not
//! itself hold). Any failure aborts the mutation before the store is touched.

use std::collections::HashSet;

use tillworks_core::{EmployeeId, ResourceId, Scope};

use crate::catalog::PermissionCode;
use crate::error::AuthzError;
use crate::evaluator::grant_covers;
use crate::grant::AccessGrant;
use crate::hierarchy::HierarchyResolver;
use crate::roles::{Role, RoleDirectory, RoleRanks};

/// The resolved administrative caller: identity, primary role (for rank
/// comparisons) and the grants it holds. Plain data, passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    pub employee_id: EmployeeId,
    pub role: Role,
    pub grants: Vec<AccessGrant>,
}

impl ActorContext {
    pub fn new(employee_id: EmployeeId, role: Role, grants: Vec<AccessGrant>) -> Self {
        Self {
            employee_id,
            role,
            grants,
        }
    }

    /// Whether any of the actor's grants covers (target, scope) under the
    /// cascade rule.
    pub fn covers(
        &self,
        target_id: ResourceId,
        scope: Scope,
        hierarchy: &dyn HierarchyResolver,
    ) -> bool {
        let ancestors = hierarchy.ancestors_of(target_id, scope);
        self.grants
            .iter()
            .any(|g| grant_covers(g, target_id, scope, &ancestors))
    }

    /// The union of effective permission sets over the actor's grants that
    /// cover (target, scope): what the actor itself holds there.
    pub fn effective_permissions_at(
        &self,
        target_id: ResourceId,
        scope: Scope,
        hierarchy: &dyn HierarchyResolver,
        roles: &dyn RoleDirectory,
    ) -> HashSet<PermissionCode> {
        let ancestors = hierarchy.ancestors_of(target_id, scope);
        let mut effective = HashSet::new();
        for grant in &self.grants {
            if !grant_covers(grant, target_id, scope, &ancestors) {
                continue;
            }
            let base = roles.base_permissions(&grant.role);
            effective.extend(grant.effective_permissions(&base));
        }
        effective
    }
}

/// Stateless checks gating grant mutation. Holds the immutable rank table.
#[derive(Debug, Clone)]
pub struct SecurityGuard {
    ranks: RoleRanks,
}

impl SecurityGuard {
    pub fn new(ranks: RoleRanks) -> Self {
        Self { ranks }
    }

    /// Rank check: the actor must strictly outrank the subject role.
    ///
    /// Applied against both the grant's current role and any proposed new
    /// role: an actor can neither modify a peer/superior nor promote a
    /// subject to its own level or above.
    pub fn validate_hierarchy(&self, actor_role: &Role, target_role: &Role) -> Result<(), AuthzError> {
        let actor_rank = self.ranks.rank(actor_role);
        let target_rank = self.ranks.rank(target_role);

        if actor_rank <= target_rank {
            tracing::warn!(
                actor_role = %actor_role,
                target_role = %target_role,
                "rank check failed"
            );
            return Err(AuthzError::denied(format!(
                "cannot modify permissions for a role of equal or higher rank ({target_role})"
            )));
        }
        Ok(())
    }

    /// Scope-access check: the actor must hold a grant covering the target
    /// grant's scope/target under the cascade rule. An ORGANIZATION-scope
    /// target requires a grant on that exact organization; a STORE-scope
    /// target is reachable directly or via a covering COMPANY/ORGANIZATION
    /// grant.
    pub fn validate_scope_access(
        &self,
        actor: &ActorContext,
        scope: Scope,
        target_id: ResourceId,
        hierarchy: &dyn HierarchyResolver,
    ) -> Result<(), AuthzError> {
        if actor.covers(target_id, scope, hierarchy) {
            return Ok(());
        }
        tracing::warn!(
            actor = %actor.employee_id,
            scope = %scope,
            target = %target_id,
            "scope-access check failed"
        );
        Err(AuthzError::denied(format!(
            "actor does not have access to this {scope} target"
        )))
    }

    /// Privilege-escalation check: every permission being newly added must
    /// already be in the actor's own effective set at the relevant scope.
    pub fn validate_privilege_escalation(
        &self,
        actor_permissions: &HashSet<PermissionCode>,
        added: &HashSet<PermissionCode>,
    ) -> Result<(), AuthzError> {
        for code in added {
            if !actor_permissions.contains(code) {
                tracing::warn!(permission = %code, "privilege escalation attempt");
                return Err(AuthzError::denied(format!(
                    "cannot grant a permission you do not possess ({code})"
                )));
            }
        }
        Ok(())
    }
}
