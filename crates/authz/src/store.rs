//! Grant storage seam.
//!
//! The engine treats the grant store as an external read model plus a single
//! atomic write path. Mutation must be all-or-nothing: concurrent readers
//! see either the old or the fully-new grant, never an intermediate state.

use std::collections::HashSet;

use thiserror::Error;

use tillworks_core::{EmployeeId, GrantId};

use crate::catalog::PermissionCode;
use crate::grant::AccessGrant;
use crate::roles::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrantStoreError {
    #[error("grant not found")]
    NotFound,

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Replacement payload for an existing grant's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantUpdate {
    pub role: Role,
    pub extra_permissions: HashSet<PermissionCode>,
    pub excluded_permissions: HashSet<PermissionCode>,
}

/// The authoritative record of which role (plus overrides) an employee holds
/// at which scope/target.
pub trait GrantStore {
    /// Load a single grant by id.
    fn load(&self, grant_id: GrantId) -> Result<AccessGrant, GrantStoreError>;

    /// All grants held by an employee, with their ids.
    /// Must be O(grants-for-employee), not O(all-grants).
    fn grants_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<(GrantId, AccessGrant)>, GrantStoreError>;

    /// Persist a new grant, returning its id.
    fn insert(&self, grant: AccessGrant) -> Result<GrantId, GrantStoreError>;

    /// Atomically replace a grant's role and overrides.
    fn update(&self, grant_id: GrantId, update: GrantUpdate) -> Result<(), GrantStoreError>;

    /// Replace *all* grants of an employee with the given set (sync
    /// semantics used by onboarding/reassignment), returning the new ids.
    fn replace_for_employee(
        &self,
        employee_id: EmployeeId,
        grants: Vec<AccessGrant>,
    ) -> Result<Vec<GrantId>, GrantStoreError>;
}
