//! Resource hierarchy resolution.
//!
//! The cascade rule (a broader grant covers narrower resources) needs the
//! ancestor chain of the checked resource. Resolution is a pure lookup
//! behind the [`HierarchyResolver`] seam; storage decides how the
//! organization→company→store relationships are kept.

use tillworks_core::{ResourceId, Scope};

/// Ancestor chain of a resource.
///
/// An unknown or deleted id resolves to no ancestors, which downstream makes
/// broader grants unmatched rather than erroring: malformed targets fail
/// closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ancestors {
    pub organization_id: Option<ResourceId>,
    pub company_id: Option<ResourceId>,
}

impl Ancestors {
    /// No ancestors resolved (unknown id).
    pub fn none() -> Self {
        Self::default()
    }

    /// An organization is its own ancestor chain.
    pub fn organization(organization_id: ResourceId) -> Self {
        Self {
            organization_id: Some(organization_id),
            company_id: None,
        }
    }

    /// A company's chain: itself plus its organization.
    pub fn company(company_id: ResourceId, organization_id: ResourceId) -> Self {
        Self {
            organization_id: Some(organization_id),
            company_id: Some(company_id),
        }
    }

    /// A store's chain: its company and that company's organization.
    pub fn store(company_id: ResourceId, organization_id: ResourceId) -> Self {
        Self {
            organization_id: Some(organization_id),
            company_id: Some(company_id),
        }
    }
}

/// Pure ancestor lookup for a resource id of a given scope type.
pub trait HierarchyResolver {
    /// Resolve ancestors of `target_id`, interpreted as a resource of
    /// `scope` type. Must have no side effects; unknown ids yield
    /// [`Ancestors::none`].
    fn ancestors_of(&self, target_id: ResourceId, scope: Scope) -> Ancestors;
}
