use thiserror::Error;

/// Why a presented token failed to decode.
///
/// Callers reject every kind the same way; the split exists for
/// diagnostics only.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed token")]
    Malformed,

    #[error("signature verification failed")]
    BadSignature,

    #[error("token expired")]
    Expired,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad username/password pair. Never says which half was wrong.
    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("could not validate credentials: {0}")]
    InvalidToken(#[from] DecodeError),

    /// Token decoded but its subject is empty or matches no known user.
    #[error("could not validate credentials: unknown subject")]
    UnknownSubject,

    /// Valid token, inactive account. Kept apart from `InvalidToken` so
    /// the HTTP layer can answer 400 instead of 401.
    #[error("inactive user")]
    AccountDisabled,

    #[error("unknown signing algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token generation failed: {0}")]
    TokenGeneration(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
