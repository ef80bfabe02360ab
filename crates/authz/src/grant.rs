//! Access grants: the authorization unit binding an employee to a role at a
//! scope/target, with per-grant permission overrides.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use tillworks_core::{EmployeeId, ResourceId, Scope};

use crate::catalog::PermissionCode;
use crate::error::AuthzError;
use crate::roles::Role;

/// One authorization unit.
///
/// `target_id` identifies the organization, company or store the grant
/// applies to; its type is implied by `scope`. `extra_permissions` are
/// granted additively beyond the role base; `excluded_permissions` are
/// revoked subtractively and always dominate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub employee_id: EmployeeId,
    pub scope: Scope,
    pub target_id: ResourceId,
    pub role: Role,
    pub extra_permissions: HashSet<PermissionCode>,
    pub excluded_permissions: HashSet<PermissionCode>,
}

impl AccessGrant {
    /// Construct a grant with empty overrides.
    ///
    /// A nil target id or a blank role name is a malformed grant and fails
    /// construction; the "target identifies a live resource of the type
    /// implied by scope" invariant is enforced by the administration path,
    /// which resolves the target before persisting.
    pub fn new(
        employee_id: EmployeeId,
        scope: Scope,
        target_id: ResourceId,
        role: Role,
    ) -> Result<Self, AuthzError> {
        if target_id.is_nil() {
            return Err(AuthzError::invariant("grant target_id must not be nil"));
        }
        if role.as_str().trim().is_empty() {
            return Err(AuthzError::invariant("grant role must not be blank"));
        }
        Ok(Self {
            employee_id,
            scope,
            target_id,
            role,
            extra_permissions: HashSet::new(),
            excluded_permissions: HashSet::new(),
        })
    }

    pub fn with_overrides(
        mut self,
        extra: HashSet<PermissionCode>,
        excluded: HashSet<PermissionCode>,
    ) -> Self {
        self.extra_permissions = extra;
        self.excluded_permissions = excluded;
        self
    }

    /// Resolve the effective permission set: `(roleBase ∪ extra) \ excluded`.
    ///
    /// Exclusion dominates: a code present in both `extra_permissions` and
    /// `excluded_permissions` is not granted.
    pub fn effective_permissions(
        &self,
        role_base: &HashSet<PermissionCode>,
    ) -> HashSet<PermissionCode> {
        let mut effective: HashSet<PermissionCode> = role_base.clone();
        effective.extend(self.extra_permissions.iter().cloned());
        for code in &self.excluded_permissions {
            effective.remove(code);
        }
        effective
    }
}
