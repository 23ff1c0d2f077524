//! Tier-aware check of one CRUD right on one resource
//!
//! The caller's coarse rights come from its client Method through the bridge
//! and are capped by the platform ceiling. Exactly one tier is checked: own
//! for a record owner, account for anyone else in the account, system for
//! everyone outside it.

use tracing::debug;

use crate::bridge::method_to_perm;
use crate::bundles;
use crate::codec::{tier_value, Crud, Tier};
use crate::credential::Credential;
use crate::error::{AuthError, Result};
use crate::resource::Resource;

/// The single tier that governs `cred` acting on `account_id` records owned by `owner_ids`
pub fn select_tier(cred: &Credential, account_id: &str, owner_ids: &[&str]) -> Tier {
    if cred.account_id != account_id {
        Tier::System
    } else if owner_ids.contains(&cred.issuer.as_str()) {
        Tier::Own
    } else {
        Tier::Account
    }
}

/// May `cred` perform `crud` on `resource` of `account_id`, records owned by `owner_ids`?
pub fn check_resource(
    cred: Option<&Credential>,
    resource: Resource,
    crud: Crud,
    account_id: &str,
    owner_ids: &[&str],
) -> Result<()> {
    let Some(cred) = cred else {
        return Err(AuthError::InvalidCredential);
    };
    let ceiling = bundles::base().get(resource);
    let caller = method_to_perm(cred.method.as_ref()).get(resource);

    let tier = select_tier(cred, account_id, owner_ids);
    let need = tier_value(tier, ceiling) & crud.bit();
    if need != 0 && need & tier_value(tier, caller) == need {
        return Ok(());
    }
    debug!(
        account = %account_id,
        issuer = %cred.issuer,
        %resource,
        crud = ?crud,
        tier = ?tier,
        "resource check: access denied"
    );
    Err(AuthError::AccessDenied)
}
