use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::{Role, User};

/// The identity part of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The requester's identity plus resolved role memberships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub roles: Vec<Role>,
}

impl Session {
    /// Builds the session for a freshly authenticated user.
    pub fn for_user(user: &User) -> Self {
        Self {
            user: SessionUser {
                id: user.id,
                email: user.email.clone(),
                name: user.name.clone(),
                email_verified: user.email_verified,
                image: user.image.clone(),
            },
            roles: user.roles.clone(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// A session as kept in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub session: Session,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(session: Session, duration_days: i64) -> Self {
        let now = Utc::now();
        Self {
            session,
            created_at: now,
            expires_at: now + chrono::Duration::days(duration_days),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
