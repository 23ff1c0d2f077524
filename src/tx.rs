//! Transaction wrapper for batched writes

use heed::RwTxn;

use crate::db::{decode_row, RowDb};
use crate::error::StoreResult;
use crate::keys;
use crate::method::Method;
use crate::row::StoredRow;

/// Write transaction over the row table
pub struct Tx<'e> {
    txn: RwTxn<'e>,
    rows: RowDb,
}

impl<'e> Tx<'e> {
    #[inline]
    pub(crate) fn new(txn: RwTxn<'e>, rows: RowDb) -> Self {
        Tx { txn, rows }
    }

    #[inline]
    pub(crate) fn commit(self) -> StoreResult<()> {
        Ok(self.txn.commit()?)
    }

    fn get(&self, key: &[u8], account_id: &str, user_id: &str) -> StoreResult<Option<StoredRow>> {
        match self.rows.get(&self.txn, key)? {
            Some(bytes) => Ok(Some(decode_row(account_id, user_id, bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &[u8], row: &StoredRow) -> StoreResult<()> {
        Ok(self.rows.put(&mut self.txn, key, &row.encode())?)
    }

    /// Replace the stored Method; the state column is untouched
    pub fn update(&mut self, account_id: &str, user_id: &str, method: &Method) -> StoreResult<()> {
        let key = keys::row_key(account_id, user_id)?;
        let mut row = self.get(&key, account_id, user_id)?.unwrap_or_default();
        row.method = *method;
        self.put(&key, &row)
    }

    /// Replace the state column; the Method is untouched
    pub fn update_state(&mut self, account_id: &str, user_id: &str, is_active: bool) -> StoreResult<()> {
        let key = keys::row_key(account_id, user_id)?;
        let mut row = self.get(&key, account_id, user_id)?.unwrap_or_default();
        row.inactive = !is_active;
        self.put(&key, &row)
    }

    /// Read inside the transaction, seeing its own writes
    pub fn read(&self, account_id: &str, user_id: &str) -> StoreResult<Method> {
        let key = keys::row_key(account_id, user_id)?;
        Ok(self.get(&key, account_id, user_id)?.map(|r| r.method).unwrap_or_default())
    }

    /// Remove a row entirely
    pub fn delete(&mut self, account_id: &str, user_id: &str) -> StoreResult<bool> {
        let key = keys::row_key(account_id, user_id)?;
        Ok(self.rows.delete(&mut self.txn, &key)?)
    }
}
