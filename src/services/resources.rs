//! Owner-scoped CRUD shared by projects, contacts, accounts and notes.

use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    repositories::store::{Database, StoredResource},
};

pub async fn list<R: StoredResource>(db: &dyn Database, owner_id: Uuid) -> Result<Vec<R>> {
    R::repository(db).list_owned(owner_id).await
}

/// A foreign or missing id is `NotFound`.
pub async fn get<R: StoredResource>(db: &dyn Database, owner_id: Uuid, id: Uuid) -> Result<R> {
    R::repository(db)
        .find_owned(owner_id, id)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn create<R: StoredResource>(
    db: &dyn Database,
    owner_id: Uuid,
    input: R::Input,
) -> Result<R> {
    let record = R::repository(db).insert_owned(owner_id, input).await?;
    tracing::info!("✅ Created {} {} for user {}", R::NAME, record.id(), owner_id);
    Ok(record)
}

pub async fn update<R: StoredResource>(
    db: &dyn Database,
    owner_id: Uuid,
    id: Uuid,
    input: R::Input,
) -> Result<R> {
    R::repository(db)
        .update_owned(owner_id, id, input)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn delete<R: StoredResource>(db: &dyn Database, owner_id: Uuid, id: Uuid) -> Result<()> {
    if !R::repository(db).delete_owned(owner_id, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!("🗑️ Deleted {} {} for user {}", R::NAME, id, owner_id);
    Ok(())
}
