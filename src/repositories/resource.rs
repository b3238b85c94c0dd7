use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::resource::Resource,
    repositories::{postgres::PgStore, store::OwnedRepository},
};

fn insert_sql<R: Resource>() -> String {
    let placeholders: Vec<String> = (0..R::COLUMNS.len())
        .map(|i| format!("${}", i + 3))
        .collect();
    format!(
        "INSERT INTO {} (id, owner_id, {}) VALUES ($1, $2, {}) RETURNING *",
        R::TABLE,
        R::COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

fn update_sql<R: Resource>() -> String {
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 3))
        .collect();
    format!(
        "UPDATE {} SET {}, updated_at = NOW() WHERE id = $1 AND owner_id = $2 RETURNING *",
        R::TABLE,
        assignments.join(", ")
    )
}

#[async_trait]
impl<R: Resource> OwnedRepository<R> for PgStore {
    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<R>> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT * FROM {} WHERE owner_id = $1 ORDER BY created_at DESC",
            R::TABLE
        );
        let statement = client.prepare_cached(&sql).await?;
        let rows = client.query(&statement, &[&owner_id]).await?;
        rows.iter().map(R::from_row).collect()
    }

    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> Result<Option<R>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT * FROM {} WHERE id = $1 AND owner_id = $2", R::TABLE);
        let statement = client.prepare_cached(&sql).await?;
        let row = client.query_opt(&statement, &[&id, &owner_id]).await?;
        row.map(|r| R::from_row(&r)).transpose()
    }

    async fn insert_owned(&self, owner_id: Uuid, input: R::Input) -> Result<R> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let mut params: Vec<&(dyn ToSql + Sync)> = vec![&id, &owner_id];
        params.extend(R::params(&input));

        let statement = client.prepare_cached(&insert_sql::<R>()).await?;
        let row = client.query_one(&statement, &params).await?;
        tracing::debug!("Inserted {} {} for {}", R::NAME, id, owner_id);
        R::from_row(&row)
    }

    async fn update_owned(&self, owner_id: Uuid, id: Uuid, input: R::Input) -> Result<Option<R>> {
        let client = self.pool.get().await?;
        let mut params: Vec<&(dyn ToSql + Sync)> = vec![&id, &owner_id];
        params.extend(R::params(&input));

        let statement = client.prepare_cached(&update_sql::<R>()).await?;
        let row = client.query_opt(&statement, &params).await?;
        row.map(|r| R::from_row(&r)).transpose()
    }

    async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let client = self.pool.get().await?;
        let sql = format!("DELETE FROM {} WHERE id = $1 AND owner_id = $2", R::TABLE);
        let statement = client.prepare_cached(&sql).await?;
        let deleted = client.execute(&statement, &[&id, &owner_id]).await?;
        Ok(deleted > 0)
    }

    async fn count_owned(&self, owner_id: Uuid) -> Result<i64> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT COUNT(*) AS total FROM {} WHERE owner_id = $1", R::TABLE);
        let statement = client.prepare_cached(&sql).await?;
        let row = client.query_one(&statement, &[&owner_id]).await?;
        row.try_get("total")
            .map_err(|_| AppError::MissingData("total".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{note::Note, project::Project};

    #[test]
    fn insert_sql_numbers_columns_after_keys() {
        assert_eq!(
            insert_sql::<Project>(),
            "INSERT INTO projects (id, owner_id, name, description, status) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        );
    }

    #[test]
    fn update_sql_is_owner_scoped() {
        assert_eq!(
            update_sql::<Note>(),
            "UPDATE notes SET title = $3, content = $4, updated_at = NOW() WHERE id = $1 AND owner_id = $2 RETURNING *"
        );
    }
}
