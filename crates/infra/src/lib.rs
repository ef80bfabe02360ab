//! Infrastructure layer: in-memory read models backing the authz seams.
//!
//! These implementations are the reference semantics for any persistent
//! adapter: grant reads are O(grants-for-employee), grant mutation is atomic
//! under a write lock, and hierarchy/role lookups are pure.

pub mod grants;
pub mod hierarchy;
pub mod roles;


pub use grants::InMemoryGrantStore;
pub use hierarchy::InMemoryHierarchy;
pub use roles::InMemoryRoleDirectory;
