use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::category::{Category, CategoryInput},
    repositories::store::Database,
};

/// Shared categories first, then the user's own; each group ordered by name.
pub async fn list_categories(db: &dyn Database, owner_id: Uuid) -> Result<Vec<Category>> {
    let mut categories = db.categories().list_default_categories().await?;
    categories.extend(db.categories().list_user_categories(owner_id).await?);
    Ok(categories)
}

pub async fn create_category(
    db: &dyn Database,
    owner_id: Uuid,
    input: CategoryInput,
) -> Result<Category> {
    db.categories()
        .insert_category(owner_id, input.name.trim().to_string())
        .await
}

/// Only the caller's own categories can be deleted.
pub async fn delete_category(db: &dyn Database, owner_id: Uuid, id: Uuid) -> Result<()> {
    if !db.categories().delete_user_category(owner_id, id).await? {
        return Err(AppError::NotFound);
    }
    Ok(())
}
