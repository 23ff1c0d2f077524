//! Permission store contract
//!
//! Rows are keyed by (account_id, user_id) and hold the Method the account
//! granted the user plus an inactive flag. Reading a missing row yields the
//! zero Method. Writes are unconditional overwrites, last write wins.

use std::sync::Arc;

use crate::constants::MAX_LIST_LIMIT;
use crate::error::StoreResult;
use crate::method::Method;

pub trait PermissionStore: Send + Sync {
    /// Overwrite the stored Method, keeping the row's state
    fn update(&self, account_id: &str, user_id: &str, method: &Method) -> StoreResult<()>;

    /// Set the row's inactive flag to `!is_active`, keeping its Method
    fn update_state(&self, account_id: &str, user_id: &str, is_active: bool) -> StoreResult<()>;

    /// Stored Method, or the zero Method when no row exists
    fn read(&self, account_id: &str, user_id: &str) -> StoreResult<Method>;

    /// Active users of `account_id` with `user_id > cursor`, ascending, whose
    /// stored Method covers `required`. At most `clamp_limit(limit)` ids.
    fn list_users_by_method(
        &self,
        account_id: &str,
        required: &Method,
        cursor: &str,
        limit: i64,
    ) -> StoreResult<Vec<String>>;
}

/// Limits outside 1..=3000 mean 3000
#[inline]
pub fn clamp_limit(limit: i64) -> usize {
    if limit <= 0 || limit > MAX_LIST_LIMIT as i64 {
        MAX_LIST_LIMIT
    } else {
        limit as usize
    }
}

impl<T: PermissionStore + ?Sized> PermissionStore for &T {
    fn update(&self, account_id: &str, user_id: &str, method: &Method) -> StoreResult<()> {
        (**self).update(account_id, user_id, method)
    }

    fn update_state(&self, account_id: &str, user_id: &str, is_active: bool) -> StoreResult<()> {
        (**self).update_state(account_id, user_id, is_active)
    }

    fn read(&self, account_id: &str, user_id: &str) -> StoreResult<Method> {
        (**self).read(account_id, user_id)
    }

    fn list_users_by_method(&self, account_id: &str, required: &Method, cursor: &str, limit: i64) -> StoreResult<Vec<String>> {
        (**self).list_users_by_method(account_id, required, cursor, limit)
    }
}

impl<T: PermissionStore + ?Sized> PermissionStore for Arc<T> {
    fn update(&self, account_id: &str, user_id: &str, method: &Method) -> StoreResult<()> {
        (**self).update(account_id, user_id, method)
    }

    fn update_state(&self, account_id: &str, user_id: &str, is_active: bool) -> StoreResult<()> {
        (**self).update_state(account_id, user_id, is_active)
    }

    fn read(&self, account_id: &str, user_id: &str) -> StoreResult<Method> {
        (**self).read(account_id, user_id)
    }

    fn list_users_by_method(&self, account_id: &str, required: &Method, cursor: &str, limit: i64) -> StoreResult<Vec<String>> {
        (**self).list_users_by_method(account_id, required, cursor, limit)
    }
}
