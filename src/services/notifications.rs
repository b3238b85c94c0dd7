use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::notification::{NewNotification, Notification},
    repositories::store::Database,
};

pub async fn list_notifications(db: &dyn Database, user_id: Uuid) -> Result<Vec<Notification>> {
    db.notifications().list_notifications(user_id).await
}

pub async fn mark_read(db: &dyn Database, user_id: Uuid, id: Uuid) -> Result<()> {
    if !db.notifications().mark_notification_read(user_id, id).await? {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Returns the number of notifications that changed.
pub async fn mark_all_read(db: &dyn Database, user_id: Uuid) -> Result<u64> {
    db.notifications().mark_all_notifications_read(user_id).await
}

pub async fn delete_notification(db: &dyn Database, user_id: Uuid, id: Uuid) -> Result<()> {
    if !db.notifications().delete_notification(user_id, id).await? {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Delivers a notification to an existing user.
pub async fn notify(db: &dyn Database, new: NewNotification) -> Result<Notification> {
    if db.users().find_user_by_id(new.user_id).await?.is_none() {
        return Err(AppError::Validation("Recipient does not exist".to_string()));
    }
    let notification = db.notifications().insert_notification(new).await?;
    tracing::info!("🔔 Notification {} sent to {}", notification.id, notification.user_id);
    Ok(notification)
}
