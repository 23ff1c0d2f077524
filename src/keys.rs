//! Row key encoding for LMDB storage.
//!
//! Keys are encoded as: [account_len: u8][account bytes][user bytes]
//! - All rows of one account share the prefix `[account_len][account]`
//! - Inside that prefix LMDB's byte order is plain ascending user_id order
//! - The user id is the unprefixed tail, so no escaping is needed

use crate::error::{StoreError, StoreResult};

/// Maximum account id length (255 bytes)
pub const MAX_ACCOUNT_LEN: usize = u8::MAX as usize;

/// Build the prefix shared by every row of `account_id`
#[inline]
pub fn account_prefix(account_id: &str) -> StoreResult<Vec<u8>> {
    row_key(account_id, "")
}

/// Build the key for (account_id, user_id)
///
/// # Example
/// ```
/// let key = tierperm::keys::row_key("acc", "bob").unwrap();
/// assert_eq!(key, b"\x03accbob");
/// ```
pub fn row_key(account_id: &str, user_id: &str) -> StoreResult<Vec<u8>> {
    let acc = account_id.as_bytes();
    if acc.len() > MAX_ACCOUNT_LEN {
        return Err(StoreError::KeyTooLong(acc.len()));
    }
    let mut key = Vec::with_capacity(1 + acc.len() + user_id.len());
    key.push(acc.len() as u8);
    key.extend_from_slice(acc);
    key.extend_from_slice(user_id.as_bytes());
    Ok(key)
}

/// Split a key into (account_id, user_id)
pub fn parse_key(bytes: &[u8]) -> Option<(&str, &str)> {
    let (&len, rest) = bytes.split_first()?;
    let len = len as usize;
    if rest.len() < len {
        return None;
    }
    let account = std::str::from_utf8(&rest[..len]).ok()?;
    let user = std::str::from_utf8(&rest[len..]).ok()?;
    Some((account, user))
}

/// User id of a key known to start with `prefix`
#[inline]
pub fn user_of<'k>(key: &'k [u8], prefix: &[u8]) -> Option<&'k str> {
    key.strip_prefix(prefix).and_then(|u| std::str::from_utf8(u).ok())
}

// ============================================================================
// Tests
// ============================================================================
