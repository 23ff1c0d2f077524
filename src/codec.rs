//! Tiered permission value codec
//!
//! A PermissionValue packs three CRUD nibbles into 12 bits:
//! bits 0-3 own tier, 4-7 account tier, 8-11 system tier.
//! Within a nibble C=8, R=4, U=2, D=1.

use serde::{Deserialize, Serialize};

use crate::constants::{ACCOUNT_SHIFT, CREATE, CRUD, CRUD_LETTERS, DELETE, OWN_SHIFT, READ, SYSTEM_SHIFT, UPDATE};

/// Packed 12-bit tiered value for one resource
pub type PermissionValue = u16;

/// Whose records a nibble applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Own,
    Account,
    System,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Own, Tier::Account, Tier::System];

    #[inline]
    pub const fn shift(self) -> u32 {
        match self {
            Tier::Own => OWN_SHIFT,
            Tier::Account => ACCOUNT_SHIFT,
            Tier::System => SYSTEM_SHIFT,
        }
    }

    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Tier::Own => 'u',
            Tier::Account => 'a',
            Tier::System => 's',
        }
    }

    pub fn from_letter(c: char) -> Option<Tier> {
        match c.to_ascii_lowercase() {
            'u' => Some(Tier::Own),
            'a' => Some(Tier::Account),
            's' => Some(Tier::System),
            _ => None,
        }
    }

    /// Nibble mask of this tier, in place
    #[inline]
    pub const fn mask(self) -> PermissionValue {
        CRUD << self.shift()
    }
}

/// One CRUD bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crud {
    Create,
    Read,
    Update,
    Delete,
}

impl Crud {
    pub const ALL: [Crud; 4] = [Crud::Create, Crud::Read, Crud::Update, Crud::Delete];

    #[inline]
    pub const fn bit(self) -> PermissionValue {
        match self {
            Crud::Create => CREATE,
            Crud::Read => READ,
            Crud::Update => UPDATE,
            Crud::Delete => DELETE,
        }
    }

    pub fn from_letter(c: char) -> Option<Crud> {
        match c.to_ascii_lowercase() {
            'c' => Some(Crud::Create),
            'r' => Some(Crud::Read),
            'u' => Some(Crud::Update),
            'd' => Some(Crud::Delete),
            _ => None,
        }
    }
}

/// OR of the CRUD bits named in `letters`; anything else is ignored.
pub fn crud_bits(letters: &str) -> PermissionValue {
    letters
        .chars()
        .filter_map(Crud::from_letter)
        .fold(0, |acc, c| acc | c.bit())
}

/// Parse a spec like `"u:cr a:r s:crud"` into a packed value.
///
/// Tokens shorter than two characters and tokens with an unknown tier letter
/// are skipped. Repeated letters are idempotent.
pub fn parse(spec: &str) -> PermissionValue {
    let mut out = 0;
    for token in spec.split_whitespace() {
        let mut chars = token.chars();
        let Some(first) = chars.next() else { continue };
        if token.chars().count() < 2 {
            continue;
        }
        let Some(tier) = Tier::from_letter(first) else { continue };
        out |= crud_bits(chars.as_str()) << tier.shift();
    }
    out
}

/// One tier's nibble shifted down to 0..=15
#[inline]
pub fn tier_value(tier: Tier, value: PermissionValue) -> PermissionValue {
    (value & tier.mask()) >> tier.shift()
}

/// One tier's nibble left in place
#[inline]
pub fn tier_filter(tier: Tier, value: PermissionValue) -> PermissionValue {
    value & tier.mask()
}

/// Render a value back into spec form, e.g. `"u:cr s:r"`
pub fn format(value: PermissionValue) -> String {
    let mut parts = Vec::new();
    for tier in Tier::ALL {
        let nibble = tier_value(tier, value);
        if nibble == 0 {
            continue;
        }
        let letters: String = CRUD_LETTERS
            .iter()
            .filter(|(_, b)| nibble & b == *b)
            .map(|(c, _)| *c)
            .collect();
        parts.push(format!("{}:{}", tier.letter(), letters));
    }
    parts.join(" ")
}
