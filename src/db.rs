//! LMDB-backed permission store

use std::ops::Bound;
use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::{info, trace, warn};

use crate::config::StoreConfig;
use crate::error::{corrupt, StoreResult};
use crate::keys;
use crate::method::Method;
use crate::row::StoredRow;
use crate::store::{clamp_limit, PermissionStore};
use crate::tx::Tx;

/// Row table: row key -> encoded StoredRow
pub type RowDb = Database<Bytes, Bytes>;

pub struct PermDb {
    env: Env,
    rows: RowDb,
    scan_batch: usize,
}

/// Decode a stored value, logging rows that cannot be read
pub(crate) fn decode_row(account_id: &str, user_id: &str, bytes: &[u8]) -> StoreResult<StoredRow> {
    StoredRow::decode(bytes).map_err(|reason| {
        warn!(account = %account_id, user = %user_id, %reason, "undecodable permission row");
        corrupt(account_id, user_id, reason)
    })
}

impl PermDb {
    /// Open (creating if needed) the environment described by `cfg`
    pub fn open(cfg: &StoreConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(&cfg.path)?;
        // SAFETY: LMDB requires no other process to open this path with different flags.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(cfg.map_size)
                .max_dbs(cfg.max_dbs)
                .open(&cfg.path)?
        };
        let mut wtxn = env.write_txn()?;
        let rows: RowDb = env.create_database(&mut wtxn, Some("perms"))?;
        wtxn.commit()?;
        info!(path = %cfg.path.display(), scan_batch = cfg.scan_batch, "permission store opened");
        Ok(PermDb {
            env,
            rows,
            scan_batch: cfg.scan_batch.max(1),
        })
    }

    /// Open with default settings at `path`
    pub fn open_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(&StoreConfig::new(path.as_ref()))
    }

    /// Run multiple writes in a single transaction
    pub fn transact<T, F: FnOnce(&mut Tx<'_>) -> StoreResult<T>>(&self, f: F) -> StoreResult<T> {
        let mut tx = Tx::new(self.env.write_txn()?, self.rows);
        let r = f(&mut tx)?;
        tx.commit()?;
        Ok(r)
    }

    /// Full row, `None` if it was never written
    pub fn read_row(&self, account_id: &str, user_id: &str) -> StoreResult<Option<StoredRow>> {
        let key = keys::row_key(account_id, user_id)?;
        let rtxn = self.env.read_txn()?;
        match self.rows.get(&rtxn, &key)? {
            Some(bytes) => Ok(Some(decode_row(account_id, user_id, bytes)?)),
            None => Ok(None),
        }
    }

    /// Number of stored rows for an account
    pub fn count_for_account(&self, account_id: &str) -> StoreResult<usize> {
        let prefix = keys::account_prefix(account_id)?;
        let rtxn = self.env.read_txn()?;
        let n = self.rows.prefix_iter(&rtxn, &prefix)?.count();
        Ok(n)
    }

    /// Drop every row (for testing)
    pub fn clear(&self) -> StoreResult<()> {
        let mut wtxn = self.env.write_txn()?;
        self.rows.clear(&mut wtxn)?;
        wtxn.commit()?;
        Ok(())
    }
}

impl PermissionStore for PermDb {
    fn update(&self, account_id: &str, user_id: &str, method: &Method) -> StoreResult<()> {
        self.transact(|tx| tx.update(account_id, user_id, method))
    }

    fn update_state(&self, account_id: &str, user_id: &str, is_active: bool) -> StoreResult<()> {
        self.transact(|tx| tx.update_state(account_id, user_id, is_active))
    }

    fn read(&self, account_id: &str, user_id: &str) -> StoreResult<Method> {
        Ok(self.read_row(account_id, user_id)?.map(|r| r.method).unwrap_or_default())
    }

    fn list_users_by_method(
        &self,
        account_id: &str,
        required: &Method,
        cursor: &str,
        limit: i64,
    ) -> StoreResult<Vec<String>> {
        let limit = clamp_limit(limit);
        let prefix = keys::account_prefix(account_id)?;
        let mut from = keys::row_key(account_id, cursor)?;
        let mut ids = Vec::new();

        // Each page is its own read txn; `from` is the last key scanned.
        loop {
            let mut next = None;
            {
                let rtxn = self.env.read_txn()?;
                let bounds: (Bound<&[u8]>, Bound<&[u8]>) = (Bound::Excluded(from.as_slice()), Bound::Unbounded);
                let mut scanned = 0;
                for item in self.rows.range(&rtxn, &bounds)? {
                    let (key, value) = item?;
                    if !key.starts_with(&prefix) {
                        break;
                    }
                    scanned += 1;
                    let user_id = keys::user_of(key, &prefix)
                        .ok_or_else(|| corrupt(account_id, "?", "user id is not utf-8"))?;
                    let row = decode_row(account_id, user_id, value)?;
                    if !row.inactive && row.method.covers(*required) {
                        ids.push(user_id.to_string());
                        if ids.len() == limit {
                            return Ok(ids);
                        }
                    }
                    if scanned == self.scan_batch {
                        next = Some(key.to_vec());
                        break;
                    }
                }
                trace!(account = %account_id, scanned, matched = ids.len(), "scanned page");
            }
            match next {
                Some(key) => from = key,
                None => return Ok(ids),
            }
        }
    }
}
