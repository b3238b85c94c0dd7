use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Result,
    models::category::Category,
    repositories::{postgres::PgStore, store::CategoryRepository},
};

#[async_trait]
impl CategoryRepository for PgStore {
    async fn list_default_categories(&self) -> Result<Vec<Category>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT id, owner_id, name, is_default, created_at
                FROM categories
                WHERE is_default = true
                ORDER BY name ASC
                "#,
                &[],
            )
            .await?;
        rows.iter().map(Category::try_from_row).collect()
    }

    async fn list_user_categories(&self, owner_id: Uuid) -> Result<Vec<Category>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT id, owner_id, name, is_default, created_at
                FROM categories
                WHERE owner_id = $1 AND is_default = false
                ORDER BY name ASC
                "#,
                &[&owner_id],
            )
            .await?;
        rows.iter().map(Category::try_from_row).collect()
    }

    async fn insert_category(&self, owner_id: Uuid, name: String) -> Result<Category> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                r#"
                INSERT INTO categories (id, owner_id, name, is_default)
                VALUES ($1, $2, $3, false)
                RETURNING id, owner_id, name, is_default, created_at
                "#,
                &[&id, &owner_id, &name],
            )
            .await?;
        Category::try_from_row(&row)
    }

    async fn delete_user_category(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute(
                "DELETE FROM categories WHERE id = $1 AND owner_id = $2 AND is_default = false",
                &[&id, &owner_id],
            )
            .await?;
        Ok(deleted > 0)
    }
}
