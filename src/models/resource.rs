use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{de::DeserializeOwned, Serialize};
use tokio_postgres::{types::ToSql, Row};
use uuid::Uuid;

use crate::error::Result;

/// A record owned by exactly one user and managed through plain CRUD.
///
/// Every query issued for a `Resource` is scoped by `owner_id`. The SQL for the
/// PostgreSQL store is derived from `TABLE` and `COLUMNS`; `COLUMNS` lists the
/// editable columns in the same order as `params` binds them.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    /// Payload accepted for both create and update.
    type Input: Validate<Context = ()> + DeserializeOwned + Send + Sync + 'static;

    /// Table name.
    const TABLE: &'static str;
    /// Human-readable singular name used in logs.
    const NAME: &'static str;
    /// Editable columns, excluding `id`, `owner_id` and the timestamps.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;

    /// Maps a full `SELECT *` row.
    fn from_row(row: &Row) -> Result<Self>;

    /// Bind parameters for `COLUMNS`, in order.
    fn params(input: &Self::Input) -> Vec<&(dyn ToSql + Sync)>;

    /// Builds a new record without a database round trip.
    fn build(id: Uuid, owner_id: Uuid, input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Overwrites the editable fields.
    fn apply(&mut self, input: Self::Input, now: DateTime<Utc>);
}
