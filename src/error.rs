//! Error types for tierperm
//!
//! Three classes are kept apart: malformed requests, authorization outcomes
//! (the ordinary negative answer of a decision) and infrastructure failures.

use thiserror::Error;

/// Failures of the permission store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("lmdb: {0}")]
    Lmdb(#[from] heed::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt row {account_id}/{user_id}: {reason}")]
    Corrupt {
        account_id: String,
        user_id: String,
        reason: String,
    },

    #[error("account id is {0} bytes, max is 255")]
    KeyTooLong(usize),
}

/// Outcome of a decision that did not succeed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credential")]
    InvalidCredential,

    #[error("wrong account in credential: expected {expected}, got {actual}")]
    WrongAccount { expected: String, actual: String },

    #[error("wrong user in credential: expected {expected}, got {actual}")]
    WrongUser { expected: String, actual: String },

    #[error("access denied")]
    AccessDenied,

    #[error("credential not set")]
    CredentialNotSet,

    #[error("missing account id")]
    MissingAccountId,

    /// The decision could not be made. Never a deny.
    #[error("internal error: {0}")]
    Internal(#[from] StoreError),
}

impl AuthError {
    /// Stable label for the error kind.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid_credential",
            Self::WrongAccount { .. } => "wrong_account",
            Self::WrongUser { .. } => "wrong_user",
            Self::AccessDenied => "access_denied",
            Self::CredentialNotSet => "credential_not_set",
            Self::MissingAccountId => "missing_account_id",
            Self::Internal(_) => "internal_error",
        }
    }

    /// True for the expected negative results of a decision.
    #[inline]
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied | Self::WrongAccount { .. } | Self::WrongUser { .. }
        )
    }

    /// True when the request itself was malformed.
    #[inline]
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredential | Self::CredentialNotSet | Self::MissingAccountId
        )
    }
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result alias for decisions
pub type Result<T> = std::result::Result<T, AuthError>;

pub(crate) fn corrupt(account_id: &str, user_id: &str, reason: impl Into<String>) -> StoreError {
    StoreError::Corrupt {
        account_id: account_id.to_string(),
        user_id: user_id.to_string(),
        reason: reason.into(),
    }
}
