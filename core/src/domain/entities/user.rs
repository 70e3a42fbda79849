//! User entity as stored by the user service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role, serialized with its exact name (`"User"`, `"Admin"`, `"SuperAdmin"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
            Role::SuperAdmin => "SuperAdmin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            "SuperAdmin" => Ok(Role::SuperAdmin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Registered account
///
/// `password_hash` is skipped by serde so a `User` can never leak it into a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auto-increment id; 0 until the repository assigns one
    pub id: u64,

    /// Unique, lower-cased email
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Display name
    pub username: String,

    pub role: Role,

    /// Inactive accounts cannot log in or refresh
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user; the email is normalized to lower case
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: normalize_email(&email.into()),
            password_hash: password_hash.into(),
            username: username.into(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the email; returns `false` when it is already the current one
    pub fn change_email(&mut self, email: &str) -> bool {
        let email = normalize_email(email);
        if email == self.email {
            return false;
        }
        self.email = email;
        self.updated_at = Utc::now();
        true
    }

    /// Change the username; returns `false` when it is already the current one
    pub fn change_username(&mut self, username: &str) -> bool {
        if username == self.username {
            return false;
        }
        self.username = username.to_string();
        self.updated_at = Utc::now();
        true
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Emails are compared and stored trimmed and lower-cased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
