//! CRUD handlers shared by every owned resource.
//!
//! Each handler is generic over the resource and is mounted once per type, e.g.
//! `get(list::<Project>)`.

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
    repositories::store::StoredResource,
    services::resources,
    state::AppState,
};

pub async fn list<R: StoredResource>(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<ApiResponse<Vec<R>>>> {
    let session = current.require_auth()?;
    let records = resources::list::<R>(state.db.as_ref(), session.user.id).await?;
    Ok(ok(records))
}

pub async fn get<R: StoredResource>(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<R>>> {
    let session = current.require_auth()?;
    let record = resources::get::<R>(state.db.as_ref(), session.user.id, id).await?;
    Ok(ok(record))
}

pub async fn create<R: StoredResource>(
    State(state): State<AppState>,
    current: CurrentSession,
    ValidJson(input): ValidJson<R::Input>,
) -> Result<Response> {
    let session = current.require_auth()?;
    let record = resources::create::<R>(state.db.as_ref(), session.user.id, input).await?;
    Ok((StatusCode::CREATED, ok(record)).into_response())
}

pub async fn update<R: StoredResource>(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
    ValidJson(input): ValidJson<R::Input>,
) -> Result<Json<ApiResponse<R>>> {
    let session = current.require_auth()?;
    let record = resources::update::<R>(state.db.as_ref(), session.user.id, id, input).await?;
    Ok(ok(record))
}

pub async fn delete<R: StoredResource>(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>> {
    let session = current.require_auth()?;
    resources::delete::<R>(state.db.as_ref(), session.user.id, id).await?;
    Ok(ok(id))
}
