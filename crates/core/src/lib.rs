pub mod config;
pub use config::{AppConfig, AuthConfig, SeedUser, ServerConfig};
