use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::error::{AuthError, Result};

/// Signing configuration for the token codec. Fixed at process start.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric secret the tokens are signed and verified with.
    pub secret: String,
    /// Signing algorithm (HMAC family, e.g. HS256).
    pub algorithm: Algorithm,
    /// Lifetime applied to tokens issued through the service.
    pub ttl_minutes: i64,
}

impl TokenConfig {
    /// Build a config with the algorithm chosen by name (e.g. "HS256").
    /// An unrecognized name is a configuration error.
    pub fn new(secret: impl Into<String>, algorithm: &str, ttl_minutes: i64) -> Result<Self> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| AuthError::UnknownAlgorithm(algorithm.to_string()))?;

        Ok(Self {
            secret: secret.into(),
            algorithm,
            ttl_minutes,
        })
    }

    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.ttl_minutes)
    }
}
