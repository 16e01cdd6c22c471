use anyhow::{Context, Result, bail};
use bazaar_api::models::is_valid_email;
use bazaar_auth::{CredentialStore, UserRecord, hash_password};
use bazaar_core::SeedUser;

/// Build the credential store from the configured users, hashing each
/// password once so only digests stay in memory.
pub fn build_credential_store(users: &[SeedUser]) -> Result<CredentialStore> {
    let mut records = Vec::with_capacity(users.len());

    for user in users {
        if !is_valid_email(&user.email) {
            bail!(
                "invalid email '{}' for user '{}'",
                user.email,
                user.username
            );
        }

        let hashed_password = hash_password(&user.password)
            .with_context(|| format!("Failed to hash password for user '{}'", user.username))?;

        records.push(UserRecord {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            disabled: user.disabled,
            hashed_password,
        });
        tracing::info!(username = %user.username, "seeded user");
    }

    if records.is_empty() {
        tracing::warn!("no users configured; every login will fail");
    }

    Ok(CredentialStore::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_auth::verify_password;

    fn seed(username: &str, password: &str) -> SeedUser {
        SeedUser {
            username: username.to_string(),
            full_name: None,
            email: format!("{username}@example.com"),
            disabled: None,
            password: password.to_string(),
        }
    }

    #[test]
    fn seeds_and_hashes_configured_users() {
        let store =
            build_credential_store(&[seed("johndoe", "secret"), seed("alice", "secret2")]).unwrap();

        assert_eq!(store.len(), 2);
        let record = store.get("johndoe").unwrap();
        assert_ne!(record.hashed_password, "secret");
        assert!(verify_password("secret", &record.hashed_password));
    }

    #[test]
    fn empty_config_yields_an_empty_store() {
        let store = build_credential_store(&[]).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn bad_email_fails_seeding() {
        let mut user = seed("johndoe", "secret");
        user.email = "not-an-email".to_string();
        assert!(build_credential_store(&[user]).is_err());
    }
}
