//! `tillworks-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod scope;

pub use error::DomainError;
pub use id::{EmployeeId, GrantId, ResourceId};
pub use scope::Scope;
