use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::error::{AuthError, DecodeError, Result};

/// Lifetime applied when the caller does not pick one.
const DEFAULT_TTL_MINUTES: i64 = 15;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the username the token was issued for.
    pub sub: String,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Sign a token for `subject`, expiring after `ttl` (15 minutes when
/// unspecified). Two tokens for the same subject issued at different
/// times differ, because the expiry differs.
pub fn generate_token(subject: &str, config: &TokenConfig, ttl: Option<Duration>) -> Result<String> {
    let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TTL_MINUTES));
    let claims = Claims {
        sub: subject.to_string(),
        exp: (Utc::now() + ttl).timestamp(),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify a token's signature and expiry and return the embedded claims.
///
/// A token is valid iff the signature verifies under the configured
/// secret and algorithm and the expiry is still in the future. No other
/// state affects validity.
pub fn validate_token(token: &str, config: &TokenConfig) -> std::result::Result<Claims, DecodeError> {
    let mut validation = Validation::new(config.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => DecodeError::Expired,
        ErrorKind::InvalidSignature => DecodeError::BadSignature,
        _ => DecodeError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig::new("test_secret_key_for_jwt", "HS256", 30).unwrap()
    }

    #[test]
    fn roundtrip_preserves_subject() {
        let config = test_config();
        let token = generate_token("johndoe", &config, None).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "johndoe");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn different_ttls_produce_different_tokens() {
        let config = test_config();
        let short = generate_token("johndoe", &config, Some(Duration::minutes(5))).unwrap();
        let long = generate_token("johndoe", &config, Some(Duration::minutes(45))).unwrap();
        assert_ne!(short, long);
    }

    #[test]
    fn wrong_secret_fails_with_bad_signature() {
        let config = test_config();
        let other = TokenConfig::new("a_different_secret", "HS256", 30).unwrap();

        let token = generate_token("johndoe", &config, None).unwrap();
        let err = validate_token(&token, &other).unwrap_err();
        assert_eq!(err, DecodeError::BadSignature);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let token = generate_token("johndoe", &config, Some(Duration::minutes(-5))).unwrap();
        let err = validate_token(&token, &config).unwrap_err();
        assert_eq!(err, DecodeError::Expired);
    }

    #[test]
    fn garbage_is_malformed() {
        let config = test_config();
        assert_eq!(
            validate_token("definitely-not-a-jwt", &config).unwrap_err(),
            DecodeError::Malformed
        );
    }

    #[test]
    fn algorithm_mismatch_is_rejected() {
        let hs256 = test_config();
        let hs384 = TokenConfig::new("test_secret_key_for_jwt", "HS384", 30).unwrap();

        let token = generate_token("johndoe", &hs256, None).unwrap();
        assert!(validate_token(&token, &hs384).is_err());
    }
}
