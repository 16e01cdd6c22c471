// Core modules
mod error;
mod jwt;
mod password;

// Service-facing modules
pub mod config;
pub mod model;
pub mod service;
pub mod store;

// Re-export error types
pub use error::{AuthError, DecodeError, Result};

// Re-export crypto primitives (for standalone use without the service)
pub use jwt::{Claims, generate_token, validate_token};
pub use password::{hash_password, verify_password};

// Re-export service-facing types
pub use config::TokenConfig;
pub use model::{AuthenticatedUser, UserRecord};
pub use service::AuthService;
pub use store::CredentialStore;
