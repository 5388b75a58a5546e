use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERADMIN: &str = "superadmin";

pub fn is_valid_role(value: &str) -> bool {
    value == ROLE_ADMIN || value == ROLE_SUPERADMIN
}

/// A back-office operator as persisted in the `admins` table.
///
/// The password hash never serializes; every response built from this type
/// is safe to return as-is.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn is_superadmin(&self) -> bool {
        self.role == ROLE_SUPERADMIN
    }
}

/// Input for admin setup and registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

pub const MIN_PASSWORD_LEN: usize = 6;

impl AdminInput {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();

        if self.username.trim().is_empty() {
            errors.insert("username".into(), "Username is required".into());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email".into(), "Email is required".into());
        } else if !email.contains('@') {
            errors.insert("email".into(), "Invalid email format".into());
        }

        if self.password.is_empty() {
            errors.insert("password".into(), "Password is required".into());
        } else if self.password.len() < MIN_PASSWORD_LEN {
            errors.insert(
                "password".into(),
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }

        if let Some(role) = &self.role {
            if !is_valid_role(role) {
                errors.insert("role".into(), format!("'{}' is not a valid role", role));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn role_or_default(&self) -> &str {
        self.role.as_deref().unwrap_or(ROLE_ADMIN)
    }
}
