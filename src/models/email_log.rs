use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{db::column, error::Result, validation::input::not_blank};

/// One sent email.
#[derive(Debug, Clone, Serialize)]
pub struct EmailLog {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub sent_at: DateTime<Utc>,
}

impl EmailLog {
    pub fn try_from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            owner_id: column(row, "owner_id")?,
            recipient: column(row, "recipient")?,
            subject: column(row, "subject")?,
            sent_at: column(row, "sent_at")?,
        })
    }
}

/// One open of a tracked email. Rows are never updated or merged.
#[derive(Debug, Clone, Serialize)]
pub struct EmailLogRead {
    pub id: Uuid,
    pub email_log_id: Uuid,
    pub ip_address: String,
    pub browser: Option<String>,
    pub operating_system: Option<String>,
    pub read_at: DateTime<Utc>,
}

impl EmailLogRead {
    pub fn try_from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            email_log_id: column(row, "email_log_id")?,
            ip_address: column(row, "ip_address")?,
            browser: column(row, "browser")?,
            operating_system: column(row, "operating_system")?,
            read_at: column(row, "read_at")?,
        })
    }
}

/// Fields recorded for an open event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmailLogRead {
    pub email_log_id: Uuid,
    pub ip_address: String,
    pub browser: Option<String>,
    pub operating_system: Option<String>,
    pub read_at: DateTime<Utc>,
}

/// An email log with the number of times it was opened.
#[derive(Debug, Clone, Serialize)]
pub struct EmailLogSummary {
    #[serde(flatten)]
    pub log: EmailLog,
    pub read_count: i64,
}

/// An email log with every open event, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct EmailLogDetail {
    #[serde(flatten)]
    pub log: EmailLog,
    pub reads: Vec<EmailLogRead>,
    pub tracking_url: String,
}

/// The request payload for recording a sent email.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailLogInput {
    #[garde(email)]
    pub recipient: String,
    #[garde(length(min = 1, max = 500), custom(not_blank))]
    pub subject: String,
}
