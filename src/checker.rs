//! Rule-based OR checker
//!
//! A checker is a list of (issuer, required Method) rules built with `or`.
//! The first rule that matches the caller's issuer and is covered by the
//! caller's real Method lets the call through.
//!
//! # Example
//! ```ignore
//! Checker::new(&store)
//!     .or("", Method::of(&[MethodFlag::ReadAgents]))
//!     .or("bot_1", Method::EMPTY)
//!     .check(Some(&cred), "acc_1")?;
//! ```

use std::fmt;

use tracing::debug;

use crate::credential::Credential;
use crate::error::{AuthError, Result};
use crate::method::Method;
use crate::store::PermissionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    /// Empty matches any issuer
    issuer: String,
    method: Method,
}

#[derive(Clone)]
pub struct Checker<'s> {
    rules: Vec<Rule>,
    store: &'s dyn PermissionStore,
}

impl<'s> Checker<'s> {
    pub fn new(store: &'s dyn PermissionStore) -> Self {
        Checker { rules: Vec::new(), store }
    }

    /// Append a rule
    pub fn or(mut self, issuer: impl Into<String>, method: Method) -> Self {
        self.rules.push(Rule { issuer: issuer.into(), method });
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate the rules for `cred`. An empty `account_id` skips the
    /// account match.
    ///
    /// A rule with an issuer and an empty Method passes as soon as the issuer
    /// matches; a rule with neither is ignored.
    pub fn check(&self, cred: Option<&Credential>, account_id: &str) -> Result<()> {
        let cred = match cred {
            Some(c) if !c.account_id.is_empty() => c,
            _ => return Err(AuthError::InvalidCredential),
        };
        if !account_id.is_empty() && cred.account_id != account_id {
            debug!(account = %account_id, actual = %cred.account_id, "checker: wrong account");
            return Err(AuthError::WrongAccount {
                expected: account_id.to_string(),
                actual: cred.account_id.clone(),
            });
        }
        let issuer = cred.issuer.as_str();
        if issuer.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        for rule in &self.rules {
            if !rule.issuer.is_empty() && rule.issuer != issuer {
                continue;
            }
            if rule.method.is_empty() {
                if rule.issuer.is_empty() {
                    continue;
                }
                return Ok(());
            }
            let Some(client) = cred.method else { break };
            let stored = self.store.read(&cred.account_id, issuer)?;
            if client.intersect(stored).covers(rule.method) {
                return Ok(());
            }
        }

        debug!(account = %cred.account_id, issuer = %issuer, rules = self.rules.len(), "checker: access denied");
        Err(AuthError::AccessDenied)
    }
}

impl fmt::Debug for Checker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker").field("rules", &self.rules).finish_non_exhaustive()
    }
}
