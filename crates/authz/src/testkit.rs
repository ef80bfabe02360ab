//! Shared test fixtures: in-memory trait implementations and a small
//! org/company/store world used across the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use tillworks_core::{EmployeeId, GrantId, ResourceId, Scope};

use crate::catalog::PermissionCode;
use crate::grant::AccessGrant;
use crate::hierarchy::{Ancestors, HierarchyResolver};
use crate::roles::{Role, RoleDirectory};
use crate::store::{GrantStore, GrantStoreError, GrantUpdate};

/// Mutable grant store backed by a locked map.
#[derive(Debug, Default)]
pub struct MemoryGrants {
    inner: RwLock<MemoryGrantsInner>,
}

#[derive(Debug, Default)]
struct MemoryGrantsInner {
    grants: HashMap<GrantId, AccessGrant>,
    next_id: i64,
}

impl MemoryGrants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(grants: Vec<AccessGrant>) -> (Self, Vec<GrantId>) {
        let store = Self::new();
        let mut ids = Vec::with_capacity(grants.len());
        for grant in grants {
            ids.push(store.insert(grant).expect("seed insert"));
        }
        (store, ids)
    }
}

impl GrantStore for MemoryGrants {
    fn load(&self, grant_id: GrantId) -> Result<AccessGrant, GrantStoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| GrantStoreError::Storage("lock poisoned".to_string()))?;
        inner
            .grants
            .get(&grant_id)
            .cloned()
            .ok_or(GrantStoreError::NotFound)
    }

    fn grants_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<(GrantId, AccessGrant)>, GrantStoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| GrantStoreError::Storage("lock poisoned".to_string()))?;
        let mut found: Vec<(GrantId, AccessGrant)> = inner
            .grants
            .iter()
            .filter(|(_, g)| g.employee_id == employee_id)
            .map(|(id, g)| (*id, g.clone()))
            .collect();
        found.sort_by_key(|(id, _)| *id);
        Ok(found)
    }

    fn insert(&self, grant: AccessGrant) -> Result<GrantId, GrantStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| GrantStoreError::Storage("lock poisoned".to_string()))?;
        inner.next_id += 1;
        let id = GrantId::new(inner.next_id);
        inner.grants.insert(id, grant);
        Ok(id)
    }

    fn update(&self, grant_id: GrantId, update: GrantUpdate) -> Result<(), GrantStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| GrantStoreError::Storage("lock poisoned".to_string()))?;
        let grant = inner
            .grants
            .get_mut(&grant_id)
            .ok_or(GrantStoreError::NotFound)?;
        grant.role = update.role;
        grant.extra_permissions = update.extra_permissions;
        grant.excluded_permissions = update.excluded_permissions;
        Ok(())
    }

    fn replace_for_employee(
        &self,
        employee_id: EmployeeId,
        grants: Vec<AccessGrant>,
    ) -> Result<Vec<GrantId>, GrantStoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| GrantStoreError::Storage("lock poisoned".to_string()))?;
        inner.grants.retain(|_, g| g.employee_id != employee_id);
        let mut ids = Vec::with_capacity(grants.len());
        for grant in grants {
            inner.next_id += 1;
            let id = GrantId::new(inner.next_id);
            inner.grants.insert(id, grant);
            ids.push(id);
        }
        Ok(ids)
    }
}

/// Grant store whose every call fails, for fail-closed tests.
pub struct BrokenGrants;

impl GrantStore for BrokenGrants {
    fn load(&self, _grant_id: GrantId) -> Result<AccessGrant, GrantStoreError> {
        Err(GrantStoreError::Storage("down".to_string()))
    }

    fn grants_for_employee(
        &self,
        _employee_id: EmployeeId,
    ) -> Result<Vec<(GrantId, AccessGrant)>, GrantStoreError> {
        Err(GrantStoreError::Storage("down".to_string()))
    }

    fn insert(&self, _grant: AccessGrant) -> Result<GrantId, GrantStoreError> {
        Err(GrantStoreError::Storage("down".to_string()))
    }

    fn update(&self, _grant_id: GrantId, _update: GrantUpdate) -> Result<(), GrantStoreError> {
        Err(GrantStoreError::Storage("down".to_string()))
    }

    fn replace_for_employee(
        &self,
        _employee_id: EmployeeId,
        _grants: Vec<AccessGrant>,
    ) -> Result<Vec<GrantId>, GrantStoreError> {
        Err(GrantStoreError::Storage("down".to_string()))
    }
}

/// Map-backed hierarchy resolver.
#[derive(Debug, Default)]
pub struct MapHierarchy {
    stores: HashMap<ResourceId, (ResourceId, ResourceId)>,
    companies: HashMap<ResourceId, ResourceId>,
    organizations: HashSet<ResourceId>,
}

impl MapHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn organization(mut self, org: ResourceId) -> Self {
        self.organizations.insert(org);
        self
    }

    pub fn company(mut self, company: ResourceId, org: ResourceId) -> Self {
        self.companies.insert(company, org);
        self
    }

    pub fn store(mut self, store: ResourceId, company: ResourceId, org: ResourceId) -> Self {
        self.stores.insert(store, (company, org));
        self
    }
}

impl HierarchyResolver for MapHierarchy {
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
            Scope::Store => match self.stores.get(&target_id) {
                Some((company, org)) => Ancestors::store(*company, *org),
                None => Ancestors::none(),
            },
        }
    }
}

/// Map-backed role directory.
#[derive(Debug, Default)]
pub struct MapRoles(HashMap<String, HashSet<PermissionCode>>);

impl MapRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, name: &str, codes: &[&'static str]) -> Self {
        self.0.insert(
            name.to_string(),
            codes.iter().map(|c| PermissionCode::new(*c)).collect(),
        );
        self
    }
}

impl RoleDirectory for MapRoles {
    fn base_permissions(&self, role: &Role) -> HashSet<PermissionCode> {
        self.0.get(role.as_str()).cloned().unwrap_or_default()
    }
}

/// A two-company organization with one store each.
pub struct World {
    pub org: ResourceId,
    pub company: ResourceId,
    pub store: ResourceId,
    pub other_company: ResourceId,
    pub other_store: ResourceId,
    pub hierarchy: MapHierarchy,
    pub roles: MapRoles,
}

pub fn world() -> World {
    let org = ResourceId::new();
    let company = ResourceId::new();
    let store = ResourceId::new();
    let other_company = ResourceId::new();
    let other_store = ResourceId::new();

    let hierarchy = MapHierarchy::new()
        .organization(org)
        .company(company, org)
        .company(other_company, org)
        .store(store, company, org)
        .store(other_store, other_company, org);

    let roles = MapRoles::new()
        .role("OWNER", &["sale:view", "sale:create", "sale:refund", "employee:update"])
        .role("ADMIN", &["sale:view", "sale:create", "sale:refund"])
        .role("MANAGER", &["sale:view", "sale:create"])
        .role("CASHIER", &["sale:view"]);

    World {
        org,
        company,
        store,
        other_company,
        other_store,
        hierarchy,
        roles,
    }
}

pub fn codes(list: &[&'static str]) -> HashSet<PermissionCode> {
    list.iter().map(|c| PermissionCode::new(*c)).collect()
}

pub fn grant(employee: i64, scope: Scope, target: ResourceId, role: &'static str) -> AccessGrant {
    AccessGrant::new(EmployeeId::new(employee), scope, target, Role::new(role))
        .expect("valid test grant")
}
