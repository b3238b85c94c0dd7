use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{db::column, error::Result, validation::input::not_blank};

/// A label for organising records.
///
/// Default categories have no owner and are visible to every user.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn try_from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            owner_id: column(row, "owner_id")?,
            name: column(row, "name")?,
            is_default: column(row, "is_default")?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[garde(length(min = 1, max = 100), custom(not_blank))]
    pub name: String,
}
