//! Stored row value encoding
//!
//! Layout (18 bytes): `[version: u8][state: u8][method: u128 BE]`

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{ROW_VERSION, STATE_INACTIVE};
use crate::method::Method;

pub const ROW_LEN: usize = 18;

/// One (account, user) row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoredRow {
    pub method: Method,
    pub inactive: bool,
}

impl StoredRow {
    pub fn encode(&self) -> [u8; ROW_LEN] {
        let mut buf = [0u8; ROW_LEN];
        buf[0] = ROW_VERSION;
        buf[1] = if self.inactive { STATE_INACTIVE } else { 0 };
        BigEndian::write_u128(&mut buf[2..], self.method.bits());
        buf
    }

    /// Decode a stored value; the error string says what is wrong with it
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() != ROW_LEN {
            return Err(format!("expected {} bytes, got {}", ROW_LEN, bytes.len()));
        }
        if bytes[0] != ROW_VERSION {
            return Err(format!("unknown row version {}", bytes[0]));
        }
        if bytes[1] & !STATE_INACTIVE != 0 {
            return Err(format!("unknown state bits {:#04x}", bytes[1]));
        }
        let bits = BigEndian::read_u128(&bytes[2..]);
        let method = Method::from_bits(bits).ok_or_else(|| format!("unknown method bits in {:#x}", bits))?;
        Ok(StoredRow {
            method,
            inactive: bytes[1] & STATE_INACTIVE != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::MethodFlag;

    #[test]
    fn test_layout() {
        let row = StoredRow { method: Method::of(&[MethodFlag::Ping]), inactive: true };
        let bytes = row.encode();
        assert_eq!(bytes[0], ROW_VERSION);
        assert_eq!(bytes[1], STATE_INACTIVE);
        assert_eq!(bytes[ROW_LEN - 1], 1); // Ping is bit 0
        assert_eq!(StoredRow::decode(&bytes).unwrap(), row);
    }

    #[test]
    fn test_rejects_short() {
        assert!(StoredRow::decode(&[ROW_VERSION, 0, 1]).is_err());
    }

    #[test]
    fn test_rejects_version() {
        let mut bytes = StoredRow::default().encode();
        bytes[0] = 9;
        assert!(StoredRow::decode(&bytes).unwrap_err().contains("version"));
    }

    #[test]
    fn test_rejects_unknown_method_bits() {
        let mut bytes = StoredRow::default().encode();
        bytes[2] = 0x80; // bit 127
        assert!(StoredRow::decode(&bytes).is_err());
    }
}
