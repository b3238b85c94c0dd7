use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::response::{ok, ApiResponse, ValidJson},
    middleware_layer::auth::CurrentSession,
    models::email_log::{EmailLogDetail, EmailLogInput, EmailLogSummary},
    services::email_logs,
    state::AppState,
};

pub async fn list_email_logs(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<Vec<EmailLogSummary>>>> {
    let session = current.require_auth()?;
    let logs = email_logs::list_email_logs(state.db.as_ref(), session.user.id).await?;
    Ok(ok(logs))
}

/// Records a sent email; the response carries the pixel URL to embed.
pub async fn create_email_log(
    State(state): State<AppState>,
    current: CurrentSession,
    ValidJson(input): ValidJson<EmailLogInput>,
) -> Result<Response> {
    let session = current.require_auth()?;
    let detail = email_logs::create_email_log(
        state.db.as_ref(),
        &state.config.public_base_url,
        session.user.id,
        input,
    )
    .await?;
    Ok((StatusCode::CREATED, ok(detail)).into_response())
}

pub async fn get_email_log(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmailLogDetail>>> {
    let session = current.require_auth()?;
    let detail = email_logs::get_email_log(
        state.db.as_ref(),
        &state.config.public_base_url,
        session.user.id,
        id,
    )
    .await?;
    Ok(ok(detail))
}
