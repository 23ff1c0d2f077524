//! In-process permission store with the same semantics as the LMDB one

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use crate::error::StoreResult;
use crate::method::Method;
use crate::row::StoredRow;
use crate::store::{clamp_limit, PermissionStore};

#[derive(Debug, Default)]
pub struct MemStore {
    rows: RwLock<BTreeMap<(String, String), StoredRow>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn upsert(&self, account_id: &str, user_id: &str, f: impl FnOnce(&mut StoredRow)) {
        let mut rows = self.rows.write();
        let row = rows
            .entry((account_id.to_string(), user_id.to_string()))
            .or_default();
        f(row);
    }
}

impl PermissionStore for MemStore {
    fn update(&self, account_id: &str, user_id: &str, method: &Method) -> StoreResult<()> {
        self.upsert(account_id, user_id, |row| row.method = *method);
        Ok(())
    }

    fn update_state(&self, account_id: &str, user_id: &str, is_active: bool) -> StoreResult<()> {
        self.upsert(account_id, user_id, |row| row.inactive = !is_active);
        Ok(())
    }

    fn read(&self, account_id: &str, user_id: &str) -> StoreResult<Method> {
        let rows = self.rows.read();
        Ok(rows
            .get(&(account_id.to_string(), user_id.to_string()))
            .map(|r| r.method)
            .unwrap_or_default())
    }

    fn list_users_by_method(
        &self,
        account_id: &str,
        required: &Method,
        cursor: &str,
        limit: i64,
    ) -> StoreResult<Vec<String>> {
        let limit = clamp_limit(limit);
        let rows = self.rows.read();
        let from = (account_id.to_string(), cursor.to_string());
        Ok(rows
            .range((Bound::Excluded(from), Bound::Unbounded))
            .take_while(|((acc, _), _)| acc == account_id)
            .filter(|(_, row)| !row.inactive && row.method.covers(*required))
            .map(|((_, user), _)| user.clone())
            .take(limit)
            .collect())
    }
}
