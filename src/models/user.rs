use std::fmt;

use chrono::{DateTime, Utc};
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user can hold. Stored as the `user_role` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSql, FromSql)]
#[serde(rename_all = "UPPERCASE")]
#[postgres(name = "user_role")]
pub enum Role {
    #[postgres(name = "ADMIN")]
    Admin,
    #[postgres(name = "USER")]
    User,
    #[postgres(name = "MODERATOR")]
    Moderator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Moderator => "MODERATOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a user in the system.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's email address, lowercased.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// The user's Argon2id password hash.
    pub password_hash: String,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Avatar URL.
    pub image: Option<String>,
    /// The user's roles.
    pub roles: Vec<Role>,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A user as shown to administrators. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            email_verified: user.email_verified,
            roles: user.roles.clone(),
            created_at: user.created_at,
        }
    }
}

/// Fields needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}
