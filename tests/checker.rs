//! Rule-based OR checker

use tierperm::*;

use MethodFlag as F;

/// Store whose every read fails
struct BrokenStore;

impl PermissionStore for BrokenStore {
    fn update(&self, _: &str, _: &str, _: &Method) -> StoreResult<()> {
        Ok(())
    }

    fn update_state(&self, _: &str, _: &str, _: bool) -> StoreResult<()> {
        Ok(())
    }

    fn read(&self, _: &str, _: &str) -> StoreResult<Method> {
        Err(StoreError::Io(std::io::Error::other("disk gone")))
    }

    fn list_users_by_method(&self, _: &str, _: &Method, _: &str, _: i64) -> StoreResult<Vec<String>> {
        Ok(Vec::new())
    }
}

fn store_with(account: &str, user: &str, method: Method) -> MemStore {
    let store = MemStore::new();
    store.update(account, user, &method).unwrap();
    store
}

#[test]
fn test_rejects_bad_credentials() {
    let store = MemStore::new();
    let checker = Checker::new(&store).or("", Method::of(&[F::ReadAgents]));

    assert!(matches!(checker.check(None, "acc"), Err(AuthError::InvalidCredential)));

    let no_account = Credential::new("", "ag1", Method::of(&[F::ReadAgents]));
    assert!(matches!(checker.check(Some(&no_account), "acc"), Err(AuthError::InvalidCredential)));

    let other = Credential::new("acc2", "ag1", Method::of(&[F::ReadAgents]));
    match checker.check(Some(&other), "acc") {
        Err(AuthError::WrongAccount { expected, actual }) => {
            assert_eq!(expected, "acc");
            assert_eq!(actual, "acc2");
        }
        r => panic!("unexpected {:?}", r),
    }

    let no_issuer = Credential::new("acc", "", Method::of(&[F::ReadAgents]));
    assert!(matches!(checker.check(Some(&no_issuer), "acc"), Err(AuthError::InvalidCredential)));
}

#[test]
fn test_wrong_account_checked_before_issuer() {
    let store = MemStore::new();
    let cred = Credential::new("acc2", "", Method::EMPTY);
    let err = Checker::new(&store).check(Some(&cred), "acc").unwrap_err();
    assert_eq!(err.code(), "wrong_account");
}

#[test]
fn test_empty_account_skips_match() {
    let store = store_with("acc", "ag1", Method::of(&[F::ReadAgents]));
    let cred = Credential::new("acc", "ag1", Method::of(&[F::ReadAgents]));
    let checker = Checker::new(&store).or("", Method::of(&[F::ReadAgents]));
    assert!(checker.check(Some(&cred), "").is_ok());
}

#[test]
fn test_real_method_is_intersection() {
    let need = Method::of(&[F::ReadAgents]);
    let checker_for = |store: &MemStore, cred: &Credential| Checker::new(store).or("", need).check(Some(cred), "acc");

    // Client and stored both grant
    let store = store_with("acc", "ag1", need);
    assert!(checker_for(&store, &Credential::new("acc", "ag1", need)).is_ok());

    // Client over-claims rights the account no longer grants
    let store = store_with("acc", "ag1", Method::of(&[F::Ping]));
    let err = checker_for(&store, &Credential::new("acc", "ag1", need)).unwrap_err();
    assert!(matches!(err, AuthError::AccessDenied));
    assert!(err.is_denial());

    // Stored grant the client was never given
    let store = store_with("acc", "ag1", need);
    assert!(checker_for(&store, &Credential::new("acc", "ag1", Method::of(&[F::Ping]))).is_err());
}

#[test]
fn test_anonymous_empty_rule_never_passes() {
    let store = MemStore::new();
    let cred = Credential::new("acc", "ag1", Method::EMPTY);
    let checker = Checker::new(&store).or("", Method::EMPTY);
    assert!(matches!(checker.check(Some(&cred), "acc"), Err(AuthError::AccessDenied)));
}

#[test]
fn test_issuer_rule_with_empty_method_passes() {
    let store = MemStore::new();
    let cred = Credential::without_method("acc", "agentX");
    let checker = Checker::new(&store).or("agentX", Method::EMPTY);
    assert!(checker.check(Some(&cred), "acc").is_ok());

    let other = Credential::without_method("acc", "agentY");
    assert!(matches!(checker.check(Some(&other), "acc"), Err(AuthError::AccessDenied)));
}

#[test]
fn test_rules_are_or() {
    let store = store_with("acc", "ag1", Method::of(&[F::SendMessage]));
    let cred = Credential::new("acc", "ag1", Method::of(&[F::SendMessage, F::ReadAgents]));
    let checker = Checker::new(&store)
        .or("", Method::of(&[F::ReadAgents]))
        .or("someone_else", Method::EMPTY)
        .or("ag1", Method::of(&[F::SendMessage]));
    assert_eq!(checker.len(), 3);
    assert!(checker.check(Some(&cred), "acc").is_ok());
}

#[test]
fn test_issuer_constraint_filters_rule() {
    let store = store_with("acc", "ag1", Method::of(&[F::ReadAgents]));
    let cred = Credential::new("acc", "ag1", Method::of(&[F::ReadAgents]));
    let checker = Checker::new(&store).or("ag2", Method::of(&[F::ReadAgents]));
    assert!(checker.check(Some(&cred), "acc").is_err());
}

#[test]
fn test_no_client_method_stops_rules() {
    let store = store_with("acc", "ag1", Method::of(&[F::ReadAgents]));
    let cred = Credential::without_method("acc", "ag1");
    let checker = Checker::new(&store)
        .or("", Method::of(&[F::ReadAgents]))
        .or("ag1", Method::EMPTY);
    assert!(matches!(checker.check(Some(&cred), "acc"), Err(AuthError::AccessDenied)));
}

#[test]
fn test_empty_checker_denies() {
    let store = MemStore::new();
    let checker = Checker::new(&store);
    assert!(checker.is_empty());
    let cred = Credential::new("acc", "ag1", Method::of(&[F::Ping]));
    assert!(matches!(checker.check(Some(&cred), "acc"), Err(AuthError::AccessDenied)));
}

#[test]
fn test_store_failure_is_internal() {
    let cred = Credential::new("acc", "ag1", Method::of(&[F::ReadAgents]));
    let err = Checker::new(&BrokenStore)
        .or("", Method::of(&[F::ReadAgents]))
        .check(Some(&cred), "acc")
        .unwrap_err();
    assert!(matches!(err, AuthError::Internal(StoreError::Io(_))));
    assert!(!err.is_denial());
    assert_eq!(err.code(), "internal_error");
}

#[test]
fn test_checker_via_authorizer() {
    let auth = Authorizer::new(store_with("acc", "ag1", Method::of(&[F::ReadRule])));
    let cred = Credential::new("acc", "ag1", Method::of(&[F::ReadRule]));
    assert!(auth.checker().or("", Method::of(&[F::ReadRule])).check(Some(&cred), "acc").is_ok());
}
