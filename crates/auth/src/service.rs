use crate::{
    config::TokenConfig,
    error::{AuthError, Result},
    jwt::{generate_token, validate_token},
    model::{AuthenticatedUser, UserRecord},
    password::verify_password,
    store::CredentialStore,
};
use chrono::Duration;

/// Authentication flows over a read-only credential store.
///
/// Every operation is a synchronous function over immutable state, so a
/// single instance serves concurrent callers without locking. The only
/// blocking cost is the hash verification itself.
pub struct AuthService {
    store: CredentialStore,
    config: TokenConfig,
}

impl AuthService {
    pub fn new(store: CredentialStore, config: TokenConfig) -> Self {
        Self { store, config }
    }

    /// Check a username/password pair against the store.
    ///
    /// An unknown username returns `None` without running the hash, so a
    /// lookup miss is cheaper than a wrong password. That timing
    /// asymmetry is accepted here rather than padded over.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&UserRecord> {
        let record = self.store.get(username)?;
        if verify_password(password, &record.hashed_password) {
            Some(record)
        } else {
            None
        }
    }

    /// Sign an access token whose subject is `username`, using the
    /// configured secret and algorithm. `ttl` falls back to the codec
    /// default when not given.
    pub fn issue_token(&self, username: &str, ttl: Option<Duration>) -> Result<String> {
        generate_token(username, &self.config, ttl)
    }

    /// Full login: credentials in, signed token out.
    ///
    /// The failure is the same whether the user is unknown or the
    /// password is wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let user = self
            .authenticate(username, password)
            .ok_or(AuthError::InvalidCredentials)?;
        self.issue_token(&user.username, Some(self.config.ttl()))
    }

    /// Resolve a presented token to its user.
    ///
    /// Token validity is checked first: only a token that decodes and
    /// resolves to a known user can go on to be rejected for a disabled
    /// account.
    pub fn current_user(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = validate_token(token, &self.config)?;
        if claims.sub.is_empty() {
            return Err(AuthError::UnknownSubject);
        }

        let record = self
            .store
            .get(&claims.sub)
            .ok_or(AuthError::UnknownSubject)?;

        if record.is_disabled() {
            return Err(AuthError::AccountDisabled);
        }

        Ok(AuthenticatedUser::from(record))
    }
}
