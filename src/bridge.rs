//! Method -> Permission mapping
//!
//! Each flag, when set, ORs a fixed (resource, tier, crud) contribution into
//! the result. This table is platform policy; change it only together with
//! the bridge tests.

use std::sync::OnceLock;

use crate::method::{Method, MethodFlag};
use crate::permission::Permission;
use crate::resource::Resource;

use MethodFlag as M;
use Resource as R;

type Contribution = &'static [(Resource, &'static str)];

const TABLE: &[(MethodFlag, Contribution)] = &[
    (M::Ping, &[(R::Ping, "u:crud a:crud")]),
    (M::CreateAccount, &[]),
    (M::DeleteAccount, &[]),
    (M::ReadAccount, &[(R::Account, "u:crud a:crud")]),
    (M::UpdateAccountInfomation, &[(R::Account, "a:u")]),
    (M::UpdatePlan, &[(R::Subscription, "u:u a:u")]),
    (M::InviteAgent, &[(R::Agent, "a:c")]),
    (M::ReadAgent, &[(R::Agent, "u:r")]),
    (M::ReadAgents, &[(R::Agent, "a:r")]),
    (M::UpdateAgent, &[(R::Agent, "u:u")]),
    (M::UpdateAgents, &[(R::Agent, "a:u")]),
    (M::UpdateAgentsState, &[(R::Agent, "a:d")]),
    (M::ResetPassword, &[(R::AgentPassword, "u:u")]),
    (M::ReadAgentPermission, &[(R::Permission, "u:r")]),
    (M::UpdateAgentsPermission, &[(R::Permission, "a:u")]),
    (M::CreateAgentGroup, &[(R::AgentGroup, "a:c")]),
    (M::ReadAgentGroup, &[(R::AgentGroup, "a:r")]),
    (M::UpdateAgentGroup, &[(R::AgentGroup, "a:u")]),
    (M::DeleteAgentGroup, &[(R::AgentGroup, "a:d")]),
    (M::CreateSegmentation, &[(R::Segmentation, "a:c")]),
    (M::ReadSegmentation, &[(R::Segmentation, "a:r")]),
    (M::UpdateSegmentation, &[(R::Segmentation, "a:u")]),
    (M::DeleteSegmentation, &[(R::Segmentation, "a:d")]),
    (M::CreateClient, &[(R::Client, "u:c a:c")]),
    (M::ReadClient, &[(R::Client, "u:r a:r")]),
    (M::UpdateClient, &[(R::Client, "u:u a:u")]),
    (M::DeleteClient, &[(R::Client, "u:d a:d")]),
    (M::CreateRule, &[(R::Rule, "a:c")]),
    (M::ReadRule, &[(R::Rule, "a:r")]),
    (M::UpdateRule, &[(R::Rule, "a:u")]),
    (M::DeleteRule, &[(R::Rule, "a:d")]),
    (M::StartConversation, &[(R::Conversation, "u:c")]),
    (M::ReadConversation, &[(R::Conversation, "u:r")]),
    (M::SendMessage, &[(R::Conversation, "u:u")]),
    (M::ReadTeammatesConversations, &[(R::Conversation, "a:r")]),
    (M::ExportConversations, &[(R::Conversation, "a:u")]),
    (M::IntegrateConnector, &[(R::Integration, "a:cud")]),
    (M::ReadUserEmail, &[(R::Integration, "u:r a:r")]),
    (M::ReadUserFacebookId, &[(R::Integration, "u:r a:r")]),
    (M::ReadUserPhones, &[(R::Integration, "u:r a:r")]),
    (M::ReadUserWidgetSetting, &[(R::Integration, "u:r a:r")]),
    (M::ReadTag, &[(R::Tag, "a:r")]),
    (M::UpdateTag, &[(R::Tag, "a:cu")]),
    (M::DeleteTag, &[(R::Tag, "a:d")]),
    (M::UpdateWidgetSetting, &[(R::Widget, "a:u")]),
    (M::CreateWhitelistDomain, &[(R::WhitelistDomain, "a:cu")]),
    (M::ReadWhitelistDomain, &[(R::WhitelistDomain, "a:r")]),
    (M::DeleteWhitelistDomain, &[(R::WhitelistDomain, "a:d")]),
    (M::CreateWhitelistIp, &[(R::WhitelistIp, "a:cu")]),
    (M::ReadWhitelistIp, &[(R::WhitelistIp, "a:r")]),
    (M::DeleteWhitelistIp, &[(R::WhitelistIp, "a:d")]),
    (M::CreateWhitelistUser, &[(R::WhitelistUser, "a:cu")]),
    (M::ReadWhitelistUser, &[(R::WhitelistUser, "a:r")]),
    (M::DeleteWhitelistUser, &[(R::WhitelistUser, "a:d")]),
    (M::PurchaseService, &[(R::Subscription, "a:u")]),
    (M::UpdatePaymentMethod, &[(R::Subscription, "a:u")]),
    (M::PayInvoice, &[(R::Subscription, "a:u"), (R::Invoice, "a:c")]),
    (M::UpdateBillingCycle, &[(R::Subscription, "a:u")]),
    (M::ReadInvoice, &[(R::Invoice, "a:r")]),
    (M::ReadSubscription, &[(R::Subscription, "a:r")]),
    (M::CreateAttribute, &[(R::Attribute, "a:c")]),
    (M::ReadAttribute, &[(R::Attribute, "a:r")]),
    (M::UpdateAttribute, &[(R::Attribute, "a:u")]),
    (M::DeleteAttribute, &[(R::Attribute, "a:d")]),
    (M::ReadAllAccounts, &[(R::Account, "s:r")]),
    (M::ReadAllAgents, &[(R::Agent, "s:r")]),
    (M::ReadPaymentComments, &[(R::PaymentComment, "s:r")]),
    (M::AddPaymentComments, &[(R::PaymentComment, "s:c")]),
    (M::ReadAllBills, &[(R::Bill, "s:r")]),
    (M::WriteAllInvoices, &[(R::Invoice, "s:cu")]),
    (M::ReadAllInvoices, &[(R::Invoice, "s:r")]),
    (M::PayAllInvoices, &[(R::Invoice, "s:u")]),
    (M::PurchaseAllServices, &[(R::Subscription, "s:u")]),
    (M::ReadAllSubscriptions, &[(R::Subscription, "s:r")]),
    (M::UpdateAllSubscriptions, &[(R::Invoice, "s:c"), (R::Subscription, "s:u")]),
    (M::AddCredit, &[(R::Subscription, "s:u")]),
    (M::TransferMoney, &[(R::Bill, "s:c")]),
    (M::ReadAllLogs, &[(R::PaymentLog, "s:r")]),
    (M::GrantAllPerm, &[(R::Permission, "s:u")]),
];

static CONTRIBUTIONS: OnceLock<Vec<Permission>> = OnceLock::new();

/// Parsed contribution of every flag, indexed by flag position
fn contributions() -> &'static [Permission] {
    CONTRIBUTIONS.get_or_init(|| {
        let mut out = vec![Permission::EMPTY; MethodFlag::ALL.len()];
        for (flag, parts) in TABLE {
            out[*flag as usize] = parts
                .iter()
                .fold(Permission::EMPTY, |p, (r, spec)| p.with(*r, spec));
        }
        out
    })
}

/// What a single flag contributes on its own
pub fn flag_to_perm(flag: MethodFlag) -> Permission {
    contributions()[flag as usize]
}

/// Coarse permission implied by a Method; `None` maps to the empty Permission
pub fn method_to_perm(method: Option<&Method>) -> Permission {
    let Some(method) = method else { return Permission::EMPTY };
    let table = contributions();
    method
        .flags()
        .fold(Permission::EMPTY, |acc, f| acc.merge(&table[f as usize]))
}
