use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use garde::Validate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::response::{ok, ApiResponse, ValidJson},
    middleware_layer::auth::CurrentSession,
    models::{
        notification::NewNotification,
        user::{Role, UserSummary},
    },
    services::{admin, notifications},
    state::AppState,
};

/// The request payload for replacing a user's roles.
#[derive(Deserialize, Validate)]
pub struct SetRolesRequest {
    #[garde(length(min = 1, max = 3))]
    pub roles: Vec<Role>,
}

pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>> {
    current.require_role(Role::Admin)?;
    let users = admin::list_users(state.db.as_ref()).await?;
    Ok(ok(users))
}

pub async fn set_roles(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(user_id): Path<Uuid>,
    ValidJson(payload): ValidJson<SetRolesRequest>,
) -> Result<Json<ApiResponse<UserSummary>>> {
    let session = current.require_role(Role::Admin)?;
    let user = admin::set_roles(state.db.as_ref(), session.user.id, user_id, payload.roles).await?;
    Ok(ok(user))
}

pub async fn send_notification(
    State(state): State<AppState>,
    current: CurrentSession,
    ValidJson(payload): ValidJson<NewNotification>,
) -> Result<Response> {
    current.require_role(Role::Admin)?;
    let notification = notifications::notify(state.db.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, ok(notification)).into_response())
}
