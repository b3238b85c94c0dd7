use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tokio_postgres::{types::ToSql, Row};
use uuid::Uuid;

use crate::{
    db::column, error::Result, models::resource::Resource, validation::input::not_blank,
};

/// A person in the user's address book.
#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactInput {
    #[garde(length(min = 1, max = 200), custom(not_blank))]
    pub name: String,
    #[garde(email)]
    pub email: Option<String>,
    #[garde(length(max = 40))]
    pub phone: Option<String>,
    #[garde(length(max = 200))]
    pub company: Option<String>,
}

impl Resource for Contact {
    type Input = ContactInput;

    const TABLE: &'static str = "contacts";
    const NAME: &'static str = "contact";
    const COLUMNS: &'static [&'static str] = &["name", "email", "phone", "company"];

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
            email: column(row, "email")?,
            phone: column(row, "phone")?,
            company: column(row, "company")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn params(input: &ContactInput) -> Vec<&(dyn ToSql + Sync)> {
        vec![&input.name, &input.email, &input.phone, &input.company]
    }

    fn build(id: Uuid, owner_id: Uuid, input: ContactInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: ContactInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.email = input.email;
        self.phone = input.phone;
        self.company = input.company;
        self.updated_at = now;
    }
}
