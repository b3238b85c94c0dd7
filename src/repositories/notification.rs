use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::notification::{NewNotification, Notification},
    repositories::{postgres::PgStore, store::NotificationRepository},
};

#[async_trait]
impl NotificationRepository for PgStore {
    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT id, user_id, title, message, is_read, created_at
                FROM notifications
                WHERE user_id = $1
                ORDER BY created_at DESC
                "#,
                &[&user_id],
            )
            .await?;
        rows.iter().map(Notification::try_from_row).collect()
    }

    async fn insert_notification(&self, new: NewNotification) -> Result<Notification> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                r#"
                INSERT INTO notifications (id, user_id, title, message)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, title, message, is_read, created_at
                "#,
                &[&id, &new.user_id, &new.title, &new.message],
            )
            .await?;
        Notification::try_from_row(&row)
    }

    async fn mark_notification_read(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let client = self.pool.get().await?;
        let updated = client
            .execute(
                "UPDATE notifications SET is_read = true WHERE id = $1 AND user_id = $2",
                &[&id, &user_id],
            )
            .await?;
        Ok(updated > 0)
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64> {
        let client = self.pool.get().await?;
        let updated = client
            .execute(
                "UPDATE notifications SET is_read = true WHERE user_id = $1 AND is_read = false",
                &[&user_id],
            )
            .await?;
        Ok(updated)
    }

    async fn delete_notification(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute(
                "DELETE FROM notifications WHERE id = $1 AND user_id = $2",
                &[&id, &user_id],
            )
            .await?;
        Ok(deleted > 0)
    }

    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "SELECT COUNT(*) AS unread FROM notifications WHERE user_id = $1 AND is_read = false",
                &[&user_id],
            )
            .await?;
        row.try_get("unread")
            .map_err(|_| AppError::MissingData("unread".to_string()))
    }
}
