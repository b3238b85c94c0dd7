use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::column,
    error::Result,
    models::email_log::{EmailLog, EmailLogInput, EmailLogRead, EmailLogSummary, NewEmailLogRead},
    repositories::{postgres::PgStore, store::EmailLogRepository},
};

#[async_trait]
impl EmailLogRepository for PgStore {
    async fn insert_email_log(&self, owner_id: Uuid, input: EmailLogInput) -> Result<EmailLog> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                r#"
                INSERT INTO email_logs (id, owner_id, recipient, subject)
                VALUES ($1, $2, $3, $4)
                RETURNING id, owner_id, recipient, subject, sent_at
                "#,
                &[&id, &owner_id, &input.recipient, &input.subject],
            )
            .await?;
        EmailLog::try_from_row(&row)
    }

    async fn list_email_logs(&self, owner_id: Uuid) -> Result<Vec<EmailLogSummary>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT l.id, l.owner_id, l.recipient, l.subject, l.sent_at,
                       COUNT(r.id) AS read_count
                FROM email_logs l
                LEFT JOIN email_log_reads r ON r.email_log_id = l.id
                WHERE l.owner_id = $1
                GROUP BY l.id
                ORDER BY l.sent_at DESC
                "#,
                &[&owner_id],
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(EmailLogSummary {
                    log: EmailLog::try_from_row(row)?,
                    read_count: column(row, "read_count")?,
                })
            })
            .collect()
    }

    async fn find_owned_email_log(&self, owner_id: Uuid, id: Uuid) -> Result<Option<EmailLog>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                r#"
                SELECT id, owner_id, recipient, subject, sent_at
                FROM email_logs
                WHERE id = $1 AND owner_id = $2
                "#,
                &[&id, &owner_id],
            )
            .await?;
        row.map(|r| EmailLog::try_from_row(&r)).transpose()
    }

    async fn find_email_log(&self, id: Uuid) -> Result<Option<EmailLog>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, owner_id, recipient, subject, sent_at FROM email_logs WHERE id = $1",
                &[&id],
            )
            .await?;
        row.map(|r| EmailLog::try_from_row(&r)).transpose()
    }

    async fn insert_email_log_read(&self, read: NewEmailLogRead) -> Result<EmailLogRead> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                r#"
                INSERT INTO email_log_reads
                    (id, email_log_id, ip_address, browser, operating_system, read_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, email_log_id, ip_address, browser, operating_system, read_at
                "#,
                &[
                    &id,
                    &read.email_log_id,
                    &read.ip_address,
                    &read.browser,
                    &read.operating_system,
                    &read.read_at,
                ],
            )
            .await?;
        EmailLogRead::try_from_row(&row)
    }

    async fn list_email_log_reads(&self, email_log_id: Uuid) -> Result<Vec<EmailLogRead>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT id, email_log_id, ip_address, browser, operating_system, read_at
                FROM email_log_reads
                WHERE email_log_id = $1
                ORDER BY read_at DESC
                "#,
                &[&email_log_id],
            )
            .await?;
        rows.iter().map(EmailLogRead::try_from_row).collect()
    }
}
