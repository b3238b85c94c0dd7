use std::net::SocketAddr;

use axum::{
    extract::{rejection::PathRejection, ConnectInfo, Path, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    services::tracking::{self, ClientMeta, TRACKING_PIXEL},
    state::AppState,
};

/// Serves the tracking pixel and records the open when the id names a log.
///
/// The response never depends on whether the id exists or whether recording
/// succeeded, so the endpoint cannot be used to probe for logs.
pub async fn track_open(
    State(state): State<AppState>,
    log_id: Result<Path<String>, PathRejection>,
    req: Request,
) -> Response {
    let log_id = log_id.map(|Path(id)| id).unwrap_or_default();

    if log_id.trim().is_empty() {
        tracing::debug!("📭 Tracking hit without a log id");
        return pixel_response();
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = ClientMeta::from_request(req.headers(), peer);

    match tracking::record_open(state.db.email_logs(), &log_id, &client).await {
        Ok(Some(read)) => {
            tracing::info!("📬 Email {} opened from {}", read.email_log_id, read.ip_address);
        }
        Ok(None) => {
            tracing::debug!("📭 Tracking hit for unknown log: {}", log_id);
        }
        Err(e) => {
            tracing::error!("❌ Failed to record email open for {}: {}", log_id, e);
        }
    }

    pixel_response()
}

/// Serves the pixel for `/track` and `/track/`.
pub async fn track_without_id() -> Response {
    pixel_response()
}

fn pixel_response() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/gif")),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
            ),
            (header::PRAGMA, HeaderValue::from_static("no-cache")),
            (header::EXPIRES, HeaderValue::from_static("0")),
            (header::CONTENT_LENGTH, HeaderValue::from(TRACKING_PIXEL.len())),
        ],
        TRACKING_PIXEL.to_vec(),
    )
        .into_response()
}
