use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    /// Users loaded into the credential store at startup.
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Symmetric secret key for token signing.
    pub secret_key: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

/// A user as written in configuration. The password is plaintext here
/// and hashed once during seeding; only the hash is kept in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedUser {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub disabled: Option<bool>,
    pub password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_token_ttl_minutes() -> i64 {
    30
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from bazaar.toml in the current directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file("bazaar.toml")
    }

    /// Load configuration with environment variable overrides.
    /// Environment variables are prefixed with BAZAAR_, for example
    /// BAZAAR_SERVER_PORT or BAZAAR_AUTH_SECRET_KEY.
    ///
    /// Returns the config and a list of environment variable overrides.
    pub fn load_with_env() -> Result<(Self, Vec<String>), ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("bazaar").required(false))
            .add_source(config::Environment::with_prefix("BAZAAR").separator("_"))
            .build()?;

        // Detect which values were overridden by environment
        let mut overrides = Vec::new();

        let env_vars = [
            ("BAZAAR_SERVER_HOST", "server.host"),
            ("BAZAAR_SERVER_PORT", "server.port"),
            ("BAZAAR_AUTH_SECRET_KEY", "auth.secret_key"),
            ("BAZAAR_AUTH_ALGORITHM", "auth.algorithm"),
            ("BAZAAR_AUTH_TOKEN_TTL_MINUTES", "auth.token_ttl_minutes"),
        ];

        for (env_var, config_key) in env_vars {
            if std::env::var(env_var).is_ok() {
                overrides.push(config_key.to_string());
            }
        }

        let app_config = config.try_deserialize()?;
        Ok((app_config, overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 3000);
        assert_eq!(default_algorithm(), "HS256");
        assert_eq!(default_token_ttl_minutes(), 30);
    }

    #[test]
    fn parses_a_full_config() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            secret_key = "sixteen-bytes!!!"

            [[users]]
            username = "johndoe"
            full_name = "John Doe"
            email = "johndoe@example.com"
            disabled = false
            password = "secret"

            [[users]]
            username = "alice"
            email = "alice@example.com"
            password = "secret2"
        "#;

        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.algorithm, "HS256");
        assert_eq!(config.auth.token_ttl_minutes, 30);
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[1].username, "alice");
        assert_eq!(config.users[1].full_name, None);
    }

    #[test]
    fn server_section_is_optional() {
        let raw = r#"
            [auth]
            secret_key = "sixteen-bytes!!!"
        "#;

        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.users.is_empty());
    }

    #[test]
    fn missing_secret_key_fails() {
        let raw = r#"
            [auth]
            algorithm = "HS256"
        "#;

        assert!(toml::from_str::<AppConfig>(raw).is_err());
    }
}
