//! Fine-grained capability flags
//!
//! A `Method` is a set of `MethodFlag`s packed into a `u128`. The bit index of
//! a flag is its declaration position and is part of the stored row format,
//! so new flags are only ever appended.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! method_flags {
    ($($name:ident),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum MethodFlag {
            $($name),*
        }

        impl MethodFlag {
            pub const ALL: &'static [MethodFlag] = &[$(MethodFlag::$name),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(MethodFlag::$name => stringify!($name)),*
                }
            }
        }
    };
}

method_flags! {
    Ping,
    CreateAccount,
    DeleteAccount,
    ReadAccount,
    UpdateAccountInfomation,
    UpdatePlan,
    InviteAgent,
    ReadAgent,
    ReadAgents,
    UpdateAgent,
    UpdateAgents,
    UpdateAgentsState,
    ResetPassword,
    ReadAgentPermission,
    UpdateAgentsPermission,
    CreateAgentGroup,
    ReadAgentGroup,
    UpdateAgentGroup,
    DeleteAgentGroup,
    CreateSegmentation,
    ReadSegmentation,
    UpdateSegmentation,
    DeleteSegmentation,
    CreateClient,
    ReadClient,
    UpdateClient,
    DeleteClient,
    CreateRule,
    ReadRule,
    UpdateRule,
    DeleteRule,
    StartConversation,
    ReadConversation,
    SendMessage,
    ReadTeammatesConversations,
    ExportConversations,
    IntegrateConnector,
    ReadUserEmail,
    ReadUserFacebookId,
    ReadUserPhones,
    ReadUserWidgetSetting,
    ReadTag,
    UpdateTag,
    DeleteTag,
    UpdateWidgetSetting,
    CreateWhitelistDomain,
    ReadWhitelistDomain,
    DeleteWhitelistDomain,
    CreateWhitelistIp,
    ReadWhitelistIp,
    DeleteWhitelistIp,
    CreateWhitelistUser,
    ReadWhitelistUser,
    DeleteWhitelistUser,
    PurchaseService,
    UpdatePaymentMethod,
    PayInvoice,
    UpdateBillingCycle,
    ReadInvoice,
    ReadSubscription,
    CreateAttribute,
    ReadAttribute,
    UpdateAttribute,
    DeleteAttribute,
    ReadAllAccounts,
    ReadAllAgents,
    ReadPaymentComments,
    AddPaymentComments,
    ReadAllBills,
    WriteAllInvoices,
    ReadAllInvoices,
    PayAllInvoices,
    PurchaseAllServices,
    ReadAllSubscriptions,
    UpdateAllSubscriptions,
    AddCredit,
    TransferMoney,
    ReadAllLogs,
    GrantAllPerm,
}

impl MethodFlag {
    #[inline]
    pub const fn bit(self) -> u128 {
        1u128 << (self as u8)
    }

    pub fn from_name(name: &str) -> Option<MethodFlag> {
        MethodFlag::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for MethodFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bits of every declared flag
pub const KNOWN_BITS: u128 = {
    let mut bits = 0u128;
    let mut i = 0;
    while i < MethodFlag::ALL.len() {
        bits |= MethodFlag::ALL[i].bit();
        i += 1;
    }
    bits
};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MethodFlag>", into = "Vec<MethodFlag>")]
pub struct Method(u128);

impl Method {
    pub const EMPTY: Method = Method(0);

    pub const fn new() -> Self {
        Self::EMPTY
    }

    pub const fn of(flags: &[MethodFlag]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < flags.len() {
            bits |= flags[i].bit();
            i += 1;
        }
        Method(bits)
    }

    /// Rebuild from stored bits; `None` if any undeclared bit is set
    pub fn from_bits(bits: u128) -> Option<Self> {
        (bits & !KNOWN_BITS == 0).then_some(Method(bits))
    }

    #[inline]
    pub const fn bits(self) -> u128 {
        self.0
    }

    pub const fn with(self, flag: MethodFlag) -> Self {
        Method(self.0 | flag.bit())
    }

    pub fn set(&mut self, flag: MethodFlag, on: bool) {
        if on {
            self.0 |= flag.bit();
        } else {
            self.0 &= !flag.bit();
        }
    }

    #[inline]
    pub const fn has(self, flag: MethodFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn flags(self) -> impl Iterator<Item = MethodFlag> {
        MethodFlag::ALL.iter().copied().filter(move |f| self.has(*f))
    }

    #[inline]
    pub const fn intersect(self, other: Method) -> Method {
        Method(self.0 & other.0)
    }

    #[inline]
    pub const fn merge(self, other: Method) -> Method {
        Method(self.0 | other.0)
    }

    #[inline]
    pub const fn subtract(self, other: Method) -> Method {
        Method(self.0 & !other.0)
    }

    /// Every flag required is also present here
    #[inline]
    pub const fn covers(self, required: Method) -> bool {
        self.0 & required.0 == required.0
    }
}

impl From<Vec<MethodFlag>> for Method {
    fn from(flags: Vec<MethodFlag>) -> Self {
        Method::of(&flags)
    }
}

impl From<Method> for Vec<MethodFlag> {
    fn from(m: Method) -> Self {
        m.flags().collect()
    }
}

impl FromIterator<MethodFlag> for Method {
    fn from_iter<I: IntoIterator<Item = MethodFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Method::EMPTY, |m, f| m.with(f))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.flags().map(MethodFlag::name)).finish()
    }
}
