//! In-memory resource hierarchy.

use std::collections::{HashMap, HashSet};

use tillworks_authz::{Ancestors, HierarchyResolver};
use tillworks_core::{ResourceId, Scope};

/// In-memory organization→company→store registry.
///
/// Registration is builder-style and happens before the resolver is shared;
/// resolution itself is a pure lookup. Ids that were never registered, or
/// registered under a different scope type, resolve to no ancestors.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHierarchy {
    organizations: HashSet<ResourceId>,
    // company → organization
    companies: HashMap<ResourceId, ResourceId>,
    // store → company
    stores: HashMap<ResourceId, ResourceId>,
}

impl InMemoryHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, organization_id: ResourceId) -> Self {
        self.organizations.insert(organization_id);
        self
    }

    pub fn with_company(mut self, company_id: ResourceId, organization_id: ResourceId) -> Self {
        self.companies.insert(company_id, organization_id);
        self
    }

    pub fn with_store(mut self, store_id: ResourceId, company_id: ResourceId) -> Self {
        self.stores.insert(store_id, company_id);
        self
    }
}

impl HierarchyResolver for InMemoryHierarchy {
    fn ancestors_of(&self, target_id: ResourceId, scope: Scope) -> Ancestors {
        match scope {
            Scope::Organization => {
                if self.organizations.contains(&target_id) {
                    Ancestors::organization(target_id)
                } else {
                    Ancestors::none()
                }
            }
            Scope::Company => match self.companies.get(&target_id) {
                Some(org) => Ancestors::company(target_id, *org),
                None => Ancestors::none(),
            },
            Scope::Store => {
                let Some(company) = self.stores.get(&target_id) else {
                    return Ancestors::none();
                };
                match self.companies.get(company) {
                    Some(org) => Ancestors::store(*company, *org),
                    // A store pointing at an unregistered company is a
                    // dangling chain; treat it as unresolved.
                    None => Ancestors::none(),
                }
            }
        }
    }
}
