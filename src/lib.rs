//! tierperm - multi-tenant authorization core
//!
//! - `codec` / `permission`: tiered bit-packed values and their per-resource algebra
//! - `method` / `bridge`: fine-grained capability flags and their coarse mapping
//! - `checker` / `allow` / `resource_check`: decision engines
//! - `store` / `db` / `mem`: the persisted per-(account, user) rights

pub mod allow;
pub mod bridge;
pub mod bundles;
pub mod checker;
pub mod codec;
pub mod config;
pub mod constants;
pub mod credential;
pub mod db;
pub mod error;
pub mod keys;
pub mod mem;
pub mod method;
pub mod permission;
pub mod resource;
pub mod resource_check;
pub mod row;
pub mod store;
pub mod tx;

pub use allow::{acc_portion, agent_portion, Authorizer, ACCOUNT_WIDE, BYPASS};
pub use bridge::{flag_to_perm, method_to_perm};
pub use checker::Checker;
pub use codec::{format, parse, tier_filter, tier_value, Crud, PermissionValue, Tier};
pub use config::{Config, ConfigError, StoreConfig};
pub use credential::Credential;
pub use db::PermDb;
pub use error::{AuthError, Result, StoreError, StoreResult};
pub use mem::MemStore;
pub use method::{Method, MethodFlag};
pub use permission::{filter_tier, intersect, merge, merge_all, subtract, Permission};
pub use resource::Resource;
pub use resource_check::check_resource;
pub use store::{clamp_limit, PermissionStore};
pub use tx::Tx;

/// Parse a permission spec; alias kept for callers composing bundles by name
#[inline]
pub fn to_perm(spec: &str) -> PermissionValue {
    codec::parse(spec)
}
