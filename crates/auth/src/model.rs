use serde::{Deserialize, Serialize};

/// A stored user as seeded at startup. Immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub disabled: Option<bool>,
    pub hashed_password: String,
}

impl UserRecord {
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }
}

/// Public view of a user: the record with the password hash stripped.
/// This is the only user shape that ever leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub disabled: Option<bool>,
}

impl From<&UserRecord> for AuthenticatedUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            disabled: record.disabled,
        }
    }
}
