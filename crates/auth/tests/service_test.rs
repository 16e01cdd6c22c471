//! End-to-end tests for the authentication service: credential checks,
//! token issuance, current-user resolution, and account-status handling.

use bazaar_auth::{
    AuthError, AuthService, CredentialStore, DecodeError, TokenConfig, UserRecord, generate_token,
    hash_password,
};
use chrono::Duration;

fn user(username: &str, password: &str, disabled: Option<bool>) -> UserRecord {
    UserRecord {
        username: username.to_string(),
        full_name: Some(format!("{username} surname")),
        email: format!("{username}@example.com"),
        disabled,
        hashed_password: hash_password(password).unwrap(),
    }
}

fn service() -> AuthService {
    let store = CredentialStore::new([
        user("alice", "secret123", Some(false)),
        user("bob", "hunter2", Some(true)),
    ]);
    let config = TokenConfig::new("service-test-secret", "HS256", 30).unwrap();
    AuthService::new(store, config)
}

#[test]
fn authenticate_accepts_the_right_password() {
    let service = service();
    let record = service.authenticate("alice", "secret123").unwrap();
    assert_eq!(record.username, "alice");
    assert_eq!(record.email, "alice@example.com");
}

#[test]
fn authenticate_rejects_the_wrong_password() {
    let service = service();
    assert!(service.authenticate("alice", "wrong").is_none());
}

#[test]
fn authenticate_rejects_unknown_users() {
    let service = service();
    assert!(service.authenticate("unknown_user", "anything").is_none());
}

#[test]
fn login_failures_are_undifferentiated() {
    let service = service();

    let unknown = service.login("mallory", "whatever").unwrap_err();
    let wrong_password = service.login("alice", "whatever").unwrap_err();

    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
}

#[test]
fn issued_token_resolves_back_to_the_user() {
    let service = service();
    let token = service
        .issue_token("alice", Some(Duration::minutes(30)))
        .unwrap();

    let current = service.current_user(&token).unwrap();
    assert_eq!(current.username, "alice");
    assert_eq!(current.email, "alice@example.com");
    assert_eq!(current.disabled, Some(false));
}

#[test]
fn login_then_current_user_roundtrip() {
    let service = service();
    let token = service.login("alice", "secret123").unwrap();
    let current = service.current_user(&token).unwrap();
    assert_eq!(current.username, "alice");
}

#[test]
fn disabled_account_is_rejected_as_inactive_not_invalid() {
    let service = service();

    // Credentials and token are both fine for bob; only the account
    // status check fails, and it fails with its own error.
    let token = service.login("bob", "hunter2").unwrap();
    let err = service.current_user(&token).unwrap_err();
    assert!(matches!(err, AuthError::AccountDisabled));
}

#[test]
fn invalid_token_short_circuits_before_the_disabled_check() {
    let service = service();
    let other = TokenConfig::new("some-other-secret", "HS256", 30).unwrap();

    // A token for disabled bob signed under the wrong key must be
    // rejected as invalid, never as inactive.
    let forged = generate_token("bob", &other, None).unwrap();
    let err = service.current_user(&forged).unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidToken(DecodeError::BadSignature)
    ));
}

#[test]
fn expired_token_is_rejected() {
    let service = service();
    let token = service
        .issue_token("alice", Some(Duration::minutes(-5)))
        .unwrap();

    let err = service.current_user(&token).unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(DecodeError::Expired)));
}

#[test]
fn token_for_an_unknown_subject_is_rejected() {
    let service = service();
    let token = service.issue_token("mallory", None).unwrap();

    let err = service.current_user(&token).unwrap_err();
    assert!(matches!(err, AuthError::UnknownSubject));
}

#[test]
fn token_with_an_empty_subject_is_rejected() {
    let service = service();
    let token = service.issue_token("", None).unwrap();

    let err = service.current_user(&token).unwrap_err();
    assert!(matches!(err, AuthError::UnknownSubject));
}

#[test]
fn malformed_token_is_rejected() {
    let service = service();
    let err = service.current_user("not.a.token").unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidToken(DecodeError::Malformed)
    ));
}
