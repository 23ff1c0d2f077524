//! Closed set of resources a Permission carries a value for

use serde::{Deserialize, Serialize};

macro_rules! resources {
    ($($name:ident),* $(,)?) => {
        /// A named resource. Declaration order is the stored field order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum Resource {
            $($name),*
        }

        impl Resource {
            pub const ALL: &'static [Resource] = &[$(Resource::$name),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Resource::$name => stringify!($name)),*
                }
            }
        }
    };
}

resources! {
    Account,
    Agent,
    AgentPassword,
    Permission,
    AgentGroup,
    Segmentation,
    Client,
    Rule,
    Conversation,
    Integration,
    CannedResponse,
    Tag,
    WhitelistIp,
    WhitelistUser,
    WhitelistDomain,
    Widget,
    Subscription,
    Invoice,
    PaymentMethod,
    Bill,
    PaymentLog,
    PaymentComment,
    User,
    Automation,
    Ping,
    Attribute,
    AgentNotification,
    ConversationExport,
    ConversationReport,
    Content,
    Pipeline,
    Currency,
    ServiceLevelAgreement,
    MessageTemplate,
}

pub const RESOURCE_COUNT: usize = Resource::ALL.len();

impl Resource {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Resource> {
        Resource::ALL.iter().copied().find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
