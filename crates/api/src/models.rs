use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub const MAX_DESCRIPTION_LEN: usize = 155;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tax: Option<f64>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Item {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_item_fields(
            "",
            self.description.as_deref(),
            self.price,
            &mut errors,
        );
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Apply a partial update, replacing only the fields the patch
    /// actually carries.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(tax) = patch.tax {
            self.tax = Some(tax);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

/// Partial item update. Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tax: Option<f64>,
    pub tags: Option<BTreeSet<String>>,
}

impl ItemPatch {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_item_fields("", self.description.as_deref(), self.price, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub items: Vec<Item>,
}

impl Offer {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            validate_item_fields(
                &format!("items[{index}]."),
                item.description.as_deref(),
                item.price,
                &mut errors,
            );
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserIn {
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub disabled: Option<bool>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOut {
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub disabled: Option<bool>,
}

impl UserIn {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.username.is_empty() {
            errors.push(FieldError::new("username", "must not be empty"));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "invalid email address"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Public view with the password dropped.
    pub fn into_public(self) -> UserOut {
        UserOut {
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            disabled: self.disabled,
        }
    }
}

fn validate_item_fields(
    prefix: &str,
    description: Option<&str>,
    price: Option<f64>,
    errors: &mut Vec<FieldError>,
) {
    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(FieldError::new(
                format!("{prefix}description"),
                format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
            ));
        }
    }
    if let Some(price) = price {
        if price <= 0.0 {
            errors.push(FieldError::new(
                format!("{prefix}price"),
                "must be greater than 0",
            ));
        }
    }
}

/// Syntactic email check: one '@', non-empty local part, dotted domain,
/// no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
