use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{db::column, error::Result, validation::input::not_blank};

/// A message shown in a user's notification inbox.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn try_from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            title: column(row, "title")?,
            message: column(row, "message")?,
            is_read: column(row, "is_read")?,
            created_at: column(row, "created_at")?,
        })
    }
}

/// The request payload for pushing a notification to a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewNotification {
    #[garde(skip)]
    pub user_id: Uuid,
    #[garde(length(min = 1, max = 200), custom(not_blank))]
    pub title: String,
    #[garde(length(min = 1, max = 2000), custom(not_blank))]
    pub message: String,
}
