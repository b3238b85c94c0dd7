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
    models::category::{Category, CategoryInput},
    services::categories,
    state::AppState,
};

pub async fn list_categories(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let session = current.require_auth()?;
    let rows = categories::list_categories(state.db.as_ref(), session.user.id).await?;
    Ok(ok(rows))
}

pub async fn create_category(
    State(state): State<AppState>,
    current: CurrentSession,
    ValidJson(input): ValidJson<CategoryInput>,
) -> Result<Response> {
    let session = current.require_auth()?;
    let category = categories::create_category(state.db.as_ref(), session.user.id, input).await?;
    tracing::info!("✅ Category {} created by {}", category.id, session.user.id);
    Ok((StatusCode::CREATED, ok(category)).into_response())
}

pub async fn delete_category(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>> {
    let session = current.require_auth()?;
    categories::delete_category(state.db.as_ref(), session.user.id, id).await?;
    Ok(ok(id))
}
