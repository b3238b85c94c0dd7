use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::response::{ok, ApiResponse},
    middleware_layer::auth::CurrentSession,
    models::notification::Notification,
    services::notifications,
    state::AppState,
};

pub async fn list_notifications(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<Vec<Notification>>>> {
    let session = current.require_auth()?;
    let rows = notifications::list_notifications(state.db.as_ref(), session.user.id).await?;
    Ok(ok(rows))
}

pub async fn mark_read(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>> {
    let session = current.require_auth()?;
    notifications::mark_read(state.db.as_ref(), session.user.id, id).await?;
    Ok(ok(id))
}

/// Returns how many notifications were marked.
pub async fn mark_all_read(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<u64>>> {
    let session = current.require_auth()?;
    let updated = notifications::mark_all_read(state.db.as_ref(), session.user.id).await?;
    Ok(ok(updated))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>> {
    let session = current.require_auth()?;
    notifications::delete_notification(state.db.as_ref(), session.user.id, id).await?;
    Ok(ok(id))
}
