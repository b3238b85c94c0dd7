use serde::Serialize;
use uuid::Uuid;

use crate::{error::Result, repositories::store::Database};

/// Counts shown on the dashboard landing page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub projects: i64,
    pub contacts: i64,
    pub accounts: i64,
    pub notes: i64,
    pub unread_notifications: i64,
}

pub async fn summary(db: &dyn Database, user_id: Uuid) -> Result<DashboardSummary> {
    Ok(DashboardSummary {
        projects: db.projects().count_owned(user_id).await?,
        contacts: db.contacts().count_owned(user_id).await?,
        accounts: db.accounts().count_owned(user_id).await?,
        notes: db.notes().count_owned(user_id).await?,
        unread_notifications: db.notifications().count_unread_notifications(user_id).await?,
    })
}
