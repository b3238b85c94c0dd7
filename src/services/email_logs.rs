use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::email_log::{EmailLogDetail, EmailLogInput, EmailLogSummary},
    repositories::store::Database,
};

/// Link embedded in outgoing emails to detect opens.
pub fn tracking_url(public_base_url: &str, log_id: Uuid) -> String {
    format!("{}/track/{}", public_base_url.trim_end_matches('/'), log_id)
}

/// Records a sent email and returns it with its tracking link.
pub async fn create_email_log(
    db: &dyn Database,
    public_base_url: &str,
    owner_id: Uuid,
    input: EmailLogInput,
) -> Result<EmailLogDetail> {
    let log = db.email_logs().insert_email_log(owner_id, input).await?;
    tracing::info!("📧 Email log {} recorded for {}", log.id, owner_id);
    Ok(EmailLogDetail {
        tracking_url: tracking_url(public_base_url, log.id),
        log,
        reads: Vec::new(),
    })
}

pub async fn list_email_logs(db: &dyn Database, owner_id: Uuid) -> Result<Vec<EmailLogSummary>> {
    db.email_logs().list_email_logs(owner_id).await
}

/// The log with every open event, scoped to its owner.
pub async fn get_email_log(
    db: &dyn Database,
    public_base_url: &str,
    owner_id: Uuid,
    id: Uuid,
) -> Result<EmailLogDetail> {
    let log = db
        .email_logs()
        .find_owned_email_log(owner_id, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let reads = db.email_logs().list_email_log_reads(log.id).await?;

    Ok(EmailLogDetail {
        tracking_url: tracking_url(public_base_url, log.id),
        log,
        reads,
    })
}
