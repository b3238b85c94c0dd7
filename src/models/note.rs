use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tokio_postgres::{types::ToSql, Row};
use uuid::Uuid;

use crate::{
    db::column, error::Result, models::resource::Resource, validation::input::not_blank,
};

#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NoteInput {
    #[garde(length(min = 1, max = 200), custom(not_blank))]
    pub title: String,
    #[serde(default)]
    #[garde(length(max = 20000))]
    pub content: String,
}

impl Resource for Note {
    type Input = NoteInput;

    const TABLE: &'static str = "notes";
    const NAME: &'static str = "note";
    const COLUMNS: &'static [&'static str] = &["title", "content"];

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
            title: column(row, "title")?,
            content: column(row, "content")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn params(input: &NoteInput) -> Vec<&(dyn ToSql + Sync)> {
        vec![&input.title, &input.content]
    }

    fn build(id: Uuid, owner_id: Uuid, input: NoteInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: NoteInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.content = input.content;
        self.updated_at = now;
    }
}
