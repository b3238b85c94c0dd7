use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tokio_postgres::{types::ToSql, Row};
use uuid::Uuid;

use crate::{
    db::column, error::Result, models::resource::Resource, validation::input::not_blank,
};

/// A customer organisation tracked by the user.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccountInput {
    #[garde(length(min = 1, max = 200), custom(not_blank))]
    pub name: String,
    #[garde(length(max = 100))]
    pub industry: Option<String>,
    #[garde(length(max = 500))]
    pub website: Option<String>,
}

impl Resource for Account {
    type Input = AccountInput;

    const TABLE: &'static str = "accounts";
    const NAME: &'static str = "account";
    const COLUMNS: &'static [&'static str] = &["name", "industry", "website"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            owner_id: column(row, "owner_id")?,
            name: column(row, "name")?,
            industry: column(row, "industry")?,
            website: column(row, "website")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn params(input: &AccountInput) -> Vec<&(dyn ToSql + Sync)> {
        vec![&input.name, &input.industry, &input.website]
    }

    fn build(id: Uuid, owner_id: Uuid, input: AccountInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: input.name,
            industry: input.industry,
            website: input.website,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: AccountInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.industry = input.industry;
        self.website = input.website;
        self.updated_at = now;
    }
}
