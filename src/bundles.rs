//! Platform ceiling and predefined permission bundles
//!
//! All values are built once on first use and never mutated.

use std::sync::OnceLock;

use crate::permission::Permission;
use crate::resource::Resource;

use Resource as R;

// The leading `o:` column is the legacy owner tier; the parser ignores it.
const BASE: &[(Resource, &str)] = &[
    (R::Account, "o:-r-- u:---- a:cru- s:cru-"),
    (R::Agent, "o:-r-- u:-ru- a:crud s:-r-d"),
    (R::AgentPassword, "o:---- u:cru- a:c-u- s:cru-"),
    (R::Permission, "o:---- u:-r-- a:-ru- s:-ru-"),
    (R::AgentGroup, "o:---- u:---- a:crud s:-r--"),
    (R::Segmentation, "o:---- u:crud a:crud s:-r--"),
    (R::Client, "o:---- u:---- a:---- s:-r--"),
    (R::Rule, "o:---- u:---- a:crud s:-r--"),
    (R::Conversation, "o:---- u:cru- a:-ru- s:cr--"),
    (R::Integration, "o:---- u:---- a:crud s:cr--"),
    (R::CannedResponse, "o:---- u:crud a:crud s:cr--"),
    (R::Tag, "o:---- u:---- a:crud s:cr--"),
    (R::WhitelistIp, "o:---- u:---- a:crud s:cr--"),
    (R::WhitelistUser, "o:---- u:---- a:crud s:cr--"),
    (R::WhitelistDomain, "o:---- u:---- a:crud s:cr--"),
    (R::Widget, "o:---- u:---- a:cru- s:cr--"),
    (R::Subscription, "o:---- u:---- a:cru- s:crud"),
    (R::Invoice, "o:---- u:---- a:-r-- s:cru-"),
    (R::PaymentMethod, "o:---- u:---- a:crud s:cru-"),
    (R::Bill, "o:---- u:---- a:-r-- s:cru-"),
    (R::PaymentLog, "o:---- u:---- a:-r-- s:-r--"),
    (R::PaymentComment, "o:---- u:---- a:---- s:cr--"),
    (R::User, "o:---- u:crud a:crud s:cru-"),
    (R::Automation, "o:-r-- u:---- a:crud s:cr--"),
    (R::Ping, "o:---- u:crud a:crud s:----"),
    (R::Attribute, "o:---- u:---- a:crud s:-r--"),
    (R::AgentNotification, "o:---- u:crud a:---- s:-r--"),
    (R::ConversationExport, "o:---- u:---- a:c--- s:----"),
    (R::ConversationReport, "o:---- u:---- a:-r-- s:-r--"),
    (R::Content, "o:-ru- u:---- a:crud s:-r--"),
    (R::Pipeline, "o:---- u:---- a:crud s:-r--"),
    (R::Currency, "o:---- u:---- a:crud s:-r--"),
];

const ACCOUNT_SETTING: &[(Resource, &str)] = &[
    (R::Account, "a:cru-"),
    (R::Agent, "a:crud"),
    (R::Permission, "a:-ru-"),
    (R::AgentGroup, "a:crud"),
    (R::Segmentation, "a:crud"),
    (R::Client, "a:crud"),
    (R::Rule, "a:crud"),
    (R::Conversation, "a:--u-"),
    (R::Integration, "a:crud"),
    (R::CannedResponse, "a:crud"),
    (R::Tag, "a:crud"),
    (R::WhitelistIp, "a:crud"),
    (R::WhitelistUser, "a:crud"),
    (R::WhitelistDomain, "a:crud"),
    (R::Widget, "a:cru-"),
    (R::User, "a:crud"),
    (R::Automation, "a:crud"),
    (R::Ping, "a:crud"),
    (R::Attribute, "a:crud"),
];

const ACCOUNT_MANAGE_ADDON: &[(Resource, &str)] = &[
    (R::Subscription, "a:cru-"),
    (R::Invoice, "a:-r--"),
    (R::PaymentMethod, "a:crud"),
    (R::Bill, "a:-r--"),
    (R::PaymentLog, "a:-r--"),
];

const AGENT: &[(Resource, &str)] = &[
    (R::Account, "a:-r--"),
    (R::Agent, "u:-ru- a:-r--"),
    (R::AgentPassword, "u:cru-"),
    (R::Permission, "u:-r-- a:-r--"),
    (R::AgentGroup, "a:-r--"),
    (R::Segmentation, "u:crud a:-r--"),
    (R::Rule, "a:-r--"),
    (R::Conversation, "u:cru- a:-r--"),
    (R::Integration, "a:-r--"),
    (R::CannedResponse, "u:crud a:-r--"),
    (R::Tag, "a:-r--"),
    (R::WhitelistIp, "a:-r--"),
    (R::WhitelistUser, "a:-r--"),
    (R::WhitelistDomain, "a:-r--"),
    (R::Widget, "a:-r--"),
    (R::Subscription, "a:-r--"),
    (R::User, "u:crud a:-r--"),
    (R::Automation, "a:-r--"),
    (R::Ping, "u:cru- a:cru-"),
    (R::Attribute, "a:-r--"),
    (R::AgentNotification, "u:crud"),
];

fn build(entries: &[(Resource, &str)]) -> Permission {
    entries.iter().fold(Permission::EMPTY, |p, (r, spec)| p.with(*r, spec))
}

struct Bundles {
    base: Permission,
    account_setting: Permission,
    account_manage: Permission,
    owner: Permission,
    agent: Permission,
}

static BUNDLES: OnceLock<Bundles> = OnceLock::new();

fn bundles() -> &'static Bundles {
    BUNDLES.get_or_init(|| {
        let account_setting = build(ACCOUNT_SETTING);
        let account_manage = account_setting.merge(&build(ACCOUNT_MANAGE_ADDON));
        let mut owner = account_manage
            .merge(&account_setting)
            .merge(&Permission::new().with(R::Conversation, "a:-r--"));
        owner.set(R::ConversationExport, crate::codec::parse("a:cr--"));
        owner.set(R::ConversationReport, crate::codec::parse("a:-r--"));
        Bundles {
            base: build(BASE),
            account_setting,
            account_manage,
            owner,
            agent: build(AGENT),
        }
    })
}

/// Platform-wide ceiling per resource and tier
pub fn base() -> &'static Permission {
    &bundles().base
}

/// Account configuration rights, no billing
pub fn account_setting() -> &'static Permission {
    &bundles().account_setting
}

/// Account setting plus billing management
pub fn account_manage() -> &'static Permission {
    &bundles().account_manage
}

pub fn owner() -> &'static Permission {
    &bundles().owner
}

/// Default rights of a regular agent
pub fn agent() -> &'static Permission {
    &bundles().agent
}
