//! Tiered allow engine
//!
//! A required Method is split into an account-wide portion (acting on any user
//! of the account) and an agent portion (acting on oneself). The caller's real
//! Method is the intersection of what its client was granted and what the
//! account stores for the caller; only that set is ever tested.

use tracing::debug;

use crate::checker::Checker;
use crate::credential::Credential;
use crate::error::{AuthError, Result};
use crate::method::{Method, MethodFlag};
use crate::store::PermissionStore;

use MethodFlag as F;

/// Flags that count as account-wide rights
pub const ACCOUNT_WIDE: Method = Method::of(&[
    F::ReadAccount,
    F::ReadAgents,
    F::UpdateAgents,
    F::InviteAgent,
    F::UpdateAgentsPermission,
    F::UpdateAgentsState,
    F::CreateAgentGroup,
    F::ReadAgentGroup,
    F::UpdateAgentGroup,
    F::DeleteAgentGroup,
]);

/// Flags that must be granted to the client itself, never inferred from
/// stored rights
pub const BYPASS: &[MethodFlag] = &[F::ResetPassword];

#[inline]
pub fn acc_portion(required: Method) -> Method {
    required.intersect(ACCOUNT_WIDE)
}

#[inline]
pub fn agent_portion(required: Method) -> Method {
    required.subtract(acc_portion(required))
}

enum Stage<'c> {
    Passed,
    /// Account-level check did not pass; agent-level check still possible
    Agent { cred: &'c Credential, real: Method },
}

/// Decision entry points over a permission store
#[derive(Debug, Clone)]
pub struct Authorizer<S> {
    store: S,
}

impl<S: PermissionStore> Authorizer<S> {
    pub fn new(store: S) -> Self {
        Authorizer { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a rule-based checker over this store
    pub fn checker(&self) -> Checker<'_> {
        Checker::new(&self.store)
    }

    fn account_stage<'c>(&self, cred: Option<&'c Credential>, account_id: &str, required: Method) -> Result<Stage<'c>> {
        let Some(cred) = cred else {
            return if required.is_empty() {
                Ok(Stage::Passed)
            } else {
                Err(AuthError::CredentialNotSet)
            };
        };
        if cred.account_id.is_empty() || cred.issuer.is_empty() {
            return Err(AuthError::InvalidCredential);
        }
        if !account_id.is_empty() && cred.account_id != account_id {
            debug!(account = %account_id, actual = %cred.account_id, "allow: wrong account");
            return Err(AuthError::WrongAccount {
                expected: account_id.to_string(),
                actual: cred.account_id.clone(),
            });
        }

        let client = cred.client_method();
        let stored = self.store.read(&cred.account_id, &cred.issuer)?;
        let real = client.intersect(stored);

        let acc = acc_portion(required);
        if !acc.is_empty() && real.covers(acc) {
            return Ok(Stage::Passed);
        }

        for flag in BYPASS {
            if required.has(*flag) && !client.has(*flag) {
                debug!(account = %cred.account_id, issuer = %cred.issuer, %flag, "allow: bypass flag not granted to client");
                return Err(AuthError::AccessDenied);
            }
        }
        Ok(Stage::Agent { cred, real })
    }

    /// Full tiered decision for acting on `user_id` in `account_id`. Empty
    /// ids skip the corresponding match.
    pub fn allow(&self, cred: Option<&Credential>, account_id: &str, user_id: &str, required: Method) -> Result<()> {
        let (cred, real) = match self.account_stage(cred, account_id, required)? {
            Stage::Passed => return Ok(()),
            Stage::Agent { cred, real } => (cred, real),
        };
        if !user_id.is_empty() && user_id != cred.issuer {
            debug!(account = %cred.account_id, issuer = %cred.issuer, target = %user_id, "allow: wrong user");
            return Err(AuthError::WrongUser {
                expected: user_id.to_string(),
                actual: cred.issuer.clone(),
            });
        }
        if real.covers(agent_portion(required)) {
            Ok(())
        } else {
            debug!(account = %cred.account_id, issuer = %cred.issuer, "allow: access denied");
            Err(AuthError::AccessDenied)
        }
    }

    /// Like `allow` but only account-wide rights are accepted
    pub fn allow_only_acc(&self, cred: Option<&Credential>, account_id: &str, required: Method) -> Result<()> {
        match self.account_stage(cred, account_id, required)? {
            Stage::Passed => Ok(()),
            Stage::Agent { cred, .. } => {
                debug!(account = %cred.account_id, issuer = %cred.issuer, "allow_only_acc: access denied");
                Err(AuthError::AccessDenied)
            }
        }
    }

    /// Trusted-caller check without a credential: the stored Method of
    /// (account_id, user_id) must cover the account-wide portion of `required`
    pub fn allow_by_user(&self, account_id: &str, user_id: &str, required: Method) -> Result<()> {
        if account_id.is_empty() {
            return Err(AuthError::MissingAccountId);
        }
        let stored = self.store.read(account_id, user_id)?;
        if stored.covers(acc_portion(required)) {
            Ok(())
        } else {
            debug!(account = %account_id, user = %user_id, "allow_by_user: access denied");
            Err(AuthError::AccessDenied)
        }
    }
}
