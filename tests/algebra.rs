//! Permission and Method set algebra

use proptest::prelude::*;
use tierperm::*;

use MethodFlag as F;
use Resource as R;

fn perm(entries: &[(Resource, &str)]) -> Permission {
    entries.iter().fold(Permission::new(), |p, (r, s)| p.with(*r, s))
}

fn arb_perm() -> impl Strategy<Value = Permission> {
    prop::collection::vec((0..Resource::ALL.len(), 0u16..0x1000), 0..12).prop_map(|entries| {
        let mut p = Permission::new();
        for (i, v) in entries {
            p.set(Resource::ALL[i], v);
        }
        p
    })
}

fn arb_method() -> impl Strategy<Value = Method> {
    prop::collection::vec(0..MethodFlag::ALL.len(), 0..20)
        .prop_map(|idx| idx.into_iter().map(|i| MethodFlag::ALL[i]).collect::<Method>())
}

// ----------------------------------------------------------------------------
// Fixed cases
// ----------------------------------------------------------------------------

#[test]
fn test_intersect_cases() {
    let a = perm(&[(R::Conversation, "u:ur"), (R::Agent, "a:r"), (R::AgentGroup, "a:r")]);
    let b = perm(&[(R::Conversation, "u:r"), (R::AgentGroup, "a:ur")]);
    let want = perm(&[(R::Conversation, "u:r"), (R::AgentGroup, "a:r")]);
    assert_eq!(intersect(&a, &b), want);

    let c = perm(&[(R::Conversation, "u:r")]);
    assert!(intersect(&c, &Permission::default()).is_empty());
    assert!(intersect(&Permission::default(), &Permission::default()).is_empty());
}

#[test]
fn test_merge_cases() {
    let a = perm(&[(R::Conversation, "u:r"), (R::Agent, "a:r")]);
    let b = perm(&[(R::Conversation, "u:u"), (R::AgentGroup, "s:d")]);
    let want = perm(&[(R::Conversation, "u:ru"), (R::Agent, "a:r"), (R::AgentGroup, "s:d")]);
    assert_eq!(merge(&a, &b), want);
    assert_eq!(merge_all([&a, &b]), want);
    assert!(merge_all(std::iter::empty()).is_empty());
}

#[test]
fn test_subtract_cases() {
    let a = perm(&[(R::Agent, "u:ru a:r"), (R::Tag, "a:crud")]);
    let b = perm(&[(R::Agent, "u:u"), (R::Tag, "a:crud")]);
    assert_eq!(subtract(&a, &b), perm(&[(R::Agent, "u:r a:r")]));
}

#[test]
fn test_filter_tier_cases() {
    let p = perm(&[(R::Agent, "u:ru a:crud s:r"), (R::Bill, "s:cru")]);
    assert_eq!(filter_tier(Tier::Own, &p), perm(&[(R::Agent, "u:ru")]));
    assert_eq!(filter_tier(Tier::Account, &p), perm(&[(R::Agent, "a:crud")]));
    assert_eq!(filter_tier(Tier::System, &p), perm(&[(R::Agent, "s:r"), (R::Bill, "s:cru")]));
}

#[test]
fn test_set_masks_high_bits() {
    let mut p = Permission::new();
    p.set(R::Agent, 0xF404);
    assert_eq!(p.get(R::Agent), 0x404);
    p.add(R::Agent, 0x1000);
    assert_eq!(p.get(R::Agent), 0x404);
}

#[test]
fn test_display_and_serde() {
    let p = perm(&[(R::Agent, "u:r"), (R::Bill, "s:c")]);
    assert_eq!(p.to_string(), "{Agent=u:r, Bill=s:c}");

    let json = serde_json::to_string(&p).unwrap();
    let back: Permission = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);

    let m = Method::of(&[F::ReadAgents, F::Ping]);
    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, r#"["Ping","ReadAgents"]"#);
    assert_eq!(serde_json::from_str::<Method>(&json).unwrap(), m);
}

#[test]
fn test_method_basics() {
    let mut m = Method::new();
    assert!(m.is_empty());
    m.set(F::SendMessage, true);
    m.set(F::ReadAgent, true);
    assert!(m.has(F::SendMessage));
    m.set(F::SendMessage, false);
    assert_eq!(m, Method::of(&[F::ReadAgent]));
    assert_eq!(m.flags().collect::<Vec<_>>(), vec![F::ReadAgent]);
    assert_eq!(MethodFlag::from_name("GrantAllPerm"), Some(F::GrantAllPerm));
    assert_eq!(MethodFlag::from_name("grantallperm"), None);
}

#[test]
fn test_method_from_bits() {
    let m = Method::of(&[F::Ping, F::GrantAllPerm]);
    assert_eq!(Method::from_bits(m.bits()), Some(m));
    assert_eq!(Method::from_bits(1u128 << 127), None);
    assert_eq!(F::Ping.bit(), 1);
    assert_eq!(F::GrantAllPerm.bit(), 1u128 << (MethodFlag::ALL.len() - 1));
}

#[test]
fn test_portions() {
    let req = Method::of(&[F::ReadAgents, F::SendMessage, F::DeleteAgentGroup]);
    assert_eq!(acc_portion(req), Method::of(&[F::ReadAgents, F::DeleteAgentGroup]));
    assert_eq!(agent_portion(req), Method::of(&[F::SendMessage]));
    assert!(acc_portion(Method::EMPTY).is_empty());
}

// ----------------------------------------------------------------------------
// Laws
// ----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_intersect_laws(a in arb_perm(), b in arb_perm()) {
        prop_assert_eq!(intersect(&a, &a), a);
        prop_assert!(intersect(&a, &Permission::default()).is_empty());
        prop_assert_eq!(intersect(&a, &b), intersect(&b, &a));
        prop_assert_eq!(intersect(&a, &merge(&a, &b)), a);
        prop_assert!(a.covers(&intersect(&a, &b)));
    }

    #[test]
    fn prop_merge_laws(a in arb_perm(), b in arb_perm(), c in arb_perm()) {
        prop_assert_eq!(merge(&a, &b), merge(&b, &a));
        prop_assert_eq!(merge(&merge(&a, &b), &c), merge(&a, &merge(&b, &c)));
        prop_assert_eq!(merge(&a, &Permission::default()), a);
        prop_assert_eq!(merge_all([&a, &b, &c]), merge(&a, &merge(&b, &c)));
    }

    #[test]
    fn prop_subtract_partitions(a in arb_perm(), b in arb_perm()) {
        let diff = subtract(&a, &b);
        prop_assert!(intersect(&diff, &b).is_empty());
        prop_assert_eq!(merge(&diff, &intersect(&a, &b)), a);
    }

    #[test]
    fn prop_tiers_partition(a in arb_perm()) {
        let parts: Vec<Permission> = Tier::ALL.iter().map(|t| filter_tier(*t, &a)).collect();
        prop_assert_eq!(merge_all(&parts), a);
        for (i, p) in parts.iter().enumerate() {
            for q in &parts[i + 1..] {
                prop_assert!(intersect(p, q).is_empty());
            }
        }
    }

    #[test]
    fn prop_parse_format(v in 0u16..0x1000) {
        prop_assert_eq!(parse(&format(v)), v);
    }

    #[test]
    fn prop_method_portions_partition(m in arb_method()) {
        let acc = acc_portion(m);
        let agent = agent_portion(m);
        prop_assert!(acc.intersect(agent).is_empty());
        prop_assert_eq!(acc.merge(agent), m);
        prop_assert!(ACCOUNT_WIDE.covers(acc));
    }

    #[test]
    fn prop_bridge_is_homomorphic(a in arb_method(), b in arb_method()) {
        let joint = method_to_perm(Some(&a.merge(b)));
        prop_assert_eq!(joint, merge(&method_to_perm(Some(&a)), &method_to_perm(Some(&b))));
    }
}
