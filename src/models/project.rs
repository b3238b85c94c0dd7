use chrono::{DateTime, Utc};
use garde::Validate;
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{
    db::column, error::Result, models::resource::Resource, validation::input::not_blank,
};

/// Lifecycle state of a project. Stored as the `project_status` enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSql, FromSql)]
#[serde(rename_all = "snake_case")]
#[postgres(name = "project_status")]
pub enum ProjectStatus {
    #[default]
    #[postgres(name = "active")]
    Active,
    #[postgres(name = "on_hold")]
    OnHold,
    #[postgres(name = "completed")]
    Completed,
    #[postgres(name = "archived")]
    Archived,
}

/// Represents a project owned by a user.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The request payload for creating or updating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectInput {
    #[garde(length(min = 1, max = 200), custom(not_blank))]
    pub name: String,
    #[garde(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub status: ProjectStatus,
}

impl Resource for Project {
    type Input = ProjectInput;

    const TABLE: &'static str = "projects";
    const NAME: &'static str = "project";
    const COLUMNS: &'static [&'static str] = &["name", "description", "status"];

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
            description: column(row, "description")?,
            status: column(row, "status")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn params(input: &ProjectInput) -> Vec<&(dyn ToSql + Sync)> {
        vec![&input.name, &input.description, &input.status]
    }

    fn build(id: Uuid, owner_id: Uuid, input: ProjectInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            name: input.name,
            description: input.description,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: ProjectInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.description = input.description;
        self.status = input.status;
        self.updated_at = now;
    }
}
