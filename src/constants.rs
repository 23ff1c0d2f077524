//! Bit layout and limits

// CRUD bits within one tier nibble
pub const CREATE: u16 = 8;
pub const READ: u16 = 4;
pub const UPDATE: u16 = 2;
pub const DELETE: u16 = 1;
pub const CRUD: u16 = CREATE | READ | UPDATE | DELETE;

// Tier shifts (own, account, system)
pub const OWN_SHIFT: u32 = 0;
pub const ACCOUNT_SHIFT: u32 = 4;
pub const SYSTEM_SHIFT: u32 = 8;

/// Only bits 0-11 of a PermissionValue are ever set
pub const VALUE_MASK: u16 = 0x0FFF;

/// Largest page ListUsersByMethod will return
pub const MAX_LIST_LIMIT: usize = 3000;

/// Rows fetched per read transaction while scanning
pub const DEFAULT_SCAN_BATCH: usize = 2000;

pub const DEFAULT_MAP_SIZE: usize = 1 << 30;
pub const DEFAULT_MAX_DBS: u32 = 2;

/// Version byte leading every stored row
pub const ROW_VERSION: u8 = 1;

// Row state bits
pub const STATE_INACTIVE: u8 = 1;

// CRUD letter names, most significant first
pub(crate) const CRUD_LETTERS: &[(char, u16)] = &[('c', CREATE), ('r', READ), ('u', UPDATE), ('d', DELETE)];
