use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    http::Method,
};
use tower_cookies::Cookies;

use crate::{crypto::csrf::tokens_match, error::AppError, state::AppState};

/// Name of the readable cookie carrying the CSRF token.
pub const CSRF_COOKIE: &str = "csrf_token";
/// Header the client echoes the token in.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// A middleware that verifies the CSRF token.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `req` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response` or an error `AppError`.
pub async fn verify_csrf(
    State(state): State<AppState>,
    cookies: Cookies,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() == Method::GET
        || req.method() == Method::HEAD
        || req.method() == Method::OPTIONS
    {
        tracing::debug!("✅ CSRF exemption: {} request", req.method());
        return next.run(req).await;
    }

    let csrf_token_cookie = match cookies.get(CSRF_COOKIE) {
        Some(c) => c.value().to_string(),
        None => {
            tracing::warn!("❌ CSRF: csrf_token cookie missing");
            return AppError::Authentication("Missing CSRF token cookie".to_string())
                .into_response();
        }
    };

    let csrf_token_header = match req.headers().get(CSRF_HEADER) {
        Some(token) => match token.to_str() {
            Ok(t) => t.to_string(),
            Err(_) => {
                tracing::warn!("❌ CSRF: malformed header");
                return AppError::Authentication("Invalid CSRF token format".to_string())
                    .into_response();
            }
        },
        None => {
            tracing::warn!("❌ CSRF: x-csrf-token header missing");
            return AppError::Authentication("Missing CSRF token header".to_string())
                .into_response();
        }
    };

    if !tokens_match(&csrf_token_cookie, &csrf_token_header) {
        tracing::warn!("❌ CSRF: tokens do not match");
        return AppError::Authentication("CSRF token mismatch".to_string()).into_response();
    }

    match state.sessions.csrf_exists(&csrf_token_cookie).await {
        Ok(true) => {
            tracing::debug!("✅ CSRF token valid");
            next.run(req).await
        }
        Ok(false) => {
            tracing::warn!("❌ CSRF: token expired or unknown");
            AppError::Authentication("CSRF token expired or invalid".to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("❌ CSRF: session store error: {}", e);
            AppError::Authentication("CSRF validation error".to_string()).into_response()
        }
    }
}
