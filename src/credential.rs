//! Authenticated caller identity

use serde::{Deserialize, Serialize};

use crate::method::Method;

/// Built per request by whoever validated the token. Never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credential {
    pub account_id: String,
    /// Acting user
    pub issuer: String,
    /// Capabilities granted to the client; `None` when the token carries none
    #[serde(default)]
    pub method: Option<Method>,
}

impl Credential {
    pub fn new(account_id: impl Into<String>, issuer: impl Into<String>, method: Method) -> Self {
        Credential {
            account_id: account_id.into(),
            issuer: issuer.into(),
            method: Some(method),
        }
    }

    /// Credential whose client carries no granted Method
    pub fn without_method(account_id: impl Into<String>, issuer: impl Into<String>) -> Self {
        Credential {
            account_id: account_id.into(),
            issuer: issuer.into(),
            method: None,
        }
    }

    /// Client-granted Method, zero when absent
    #[inline]
    pub fn client_method(&self) -> Method {
        self.method.unwrap_or_default()
    }
}
