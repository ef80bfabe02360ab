//! In-memory access grant store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use tillworks_authz::{AccessGrant, GrantStore, GrantStoreError, GrantUpdate};
use tillworks_core::{EmployeeId, GrantId};

#[derive(Debug, Clone)]
struct GrantRecord {
    grant: AccessGrant,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<GrantId, GrantRecord>,
    by_employee: HashMap<EmployeeId, Vec<GrantId>>,
    next_id: i64,
}

/// In-memory grant store.
///
/// Intended for tests/dev. Reads per employee go through a secondary index
/// so lookups stay proportional to that employee's grants. All mutation runs
/// under the write lock: concurrent readers observe either the old or the
/// fully-new state.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    inner: RwLock<Inner>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the grant was last written, for diagnostics.
    pub fn updated_at(&self, grant_id: GrantId) -> Result<DateTime<Utc>, GrantStoreError> {
        let inner = read(&self.inner)?;
        inner
            .records
            .get(&grant_id)
            .map(|r| r.updated_at)
            .ok_or(GrantStoreError::NotFound)
    }
}

fn read(lock: &RwLock<Inner>) -> Result<std::sync::RwLockReadGuard<'_, Inner>, GrantStoreError> {
    lock.read()
        .map_err(|_| GrantStoreError::Storage("grant store lock poisoned".to_string()))
}

fn write(lock: &RwLock<Inner>) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, GrantStoreError> {
    lock.write()
        .map_err(|_| GrantStoreError::Storage("grant store lock poisoned".to_string()))
}

impl Inner {
    fn insert_locked(&mut self, grant: AccessGrant) -> GrantId {
        self.next_id += 1;
        let id = GrantId::new(self.next_id);
        self.by_employee.entry(grant.employee_id).or_default().push(id);
        self.records.insert(
            id,
            GrantRecord {
                grant,
                updated_at: Utc::now(),
            },
        );
        id
    }
}

impl GrantStore for InMemoryGrantStore {
    fn load(&self, grant_id: GrantId) -> Result<AccessGrant, GrantStoreError> {
        let inner = read(&self.inner)?;
        inner
            .records
            .get(&grant_id)
            .map(|r| r.grant.clone())
            .ok_or(GrantStoreError::NotFound)
    }

    fn grants_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<(GrantId, AccessGrant)>, GrantStoreError> {
        let inner = read(&self.inner)?;
        let ids = match inner.by_employee.get(&employee_id) {
            Some(ids) => ids,
            None => return Ok(vec![]),
        };
        Ok(ids
            .iter()
            .filter_map(|id| inner.records.get(id).map(|r| (*id, r.grant.clone())))
            .collect())
    }

    fn insert(&self, grant: AccessGrant) -> Result<GrantId, GrantStoreError> {
        let mut inner = write(&self.inner)?;
        Ok(inner.insert_locked(grant))
    }

    fn update(&self, grant_id: GrantId, update: GrantUpdate) -> Result<(), GrantStoreError> {
        let mut inner = write(&self.inner)?;
        let record = inner
            .records
            .get_mut(&grant_id)
            .ok_or(GrantStoreError::NotFound)?;
        record.grant.role = update.role;
        record.grant.extra_permissions = update.extra_permissions;
        record.grant.excluded_permissions = update.excluded_permissions;
        record.updated_at = Utc::now();
        Ok(())
    }

    fn replace_for_employee(
        &self,
        employee_id: EmployeeId,
        grants: Vec<AccessGrant>,
    ) -> Result<Vec<GrantId>, GrantStoreError> {
        let mut inner = write(&self.inner)?;
        if let Some(old_ids) = inner.by_employee.remove(&employee_id) {
            for id in old_ids {
                inner.records.remove(&id);
            }
        }
        let ids = grants
            .into_iter()
            .map(|g| inner.insert_locked(g))
            .collect();
        Ok(ids)
    }
}
