//! `tillworks-authz` — hierarchical scope-based permission engine.
//!
//! This crate is the authorization core of the back office: it decides, for
//! any (employee, permission, target resource) triple, whether the employee
//! is authorized, and it computes the permission matrix administration UIs
//! use to edit that authorization. It is intentionally decoupled from HTTP
//! and storage: collaborators reach it through the [`GrantStore`],
//! [`HierarchyResolver`] and [`RoleDirectory`] seams.

pub mod admin;
pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod grant;
pub mod guard;
pub mod hierarchy;
pub mod matrix;
pub mod roles;
pub mod store;

#[cfg(test)]
pub(crate) mod testkit;

pub use admin::{EmployeePermissionMatrix, GrantAdministration, GrantSummary, UpdateGrantRequest};
pub use catalog::{CatalogEntry, Module, PermissionCatalog, PermissionCode};
pub use error::AuthzError;
pub use evaluator::{grant_covers, AuthorizationEvaluator};
pub use grant::AccessGrant;
pub use guard::{ActorContext, SecurityGuard};
pub use hierarchy::{Ancestors, HierarchyResolver};
pub use matrix::{calculate_matrix, GrantMatrix, ModulePermissions, PermissionRow, PermissionSource};
pub use roles::{Role, RoleDirectory, RoleRanks};
pub use store::{GrantStore, GrantStoreError, GrantUpdate};
