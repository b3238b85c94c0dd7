use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::{
    crypto::csrf::{generate_csrf_token, CSRF_TOKEN_TTL_SECS},
    error::{AppError, Result},
    handlers::response::{ok, ApiResponse, ValidJson},
    middleware_layer::{
        auth::{extract_session_token, CurrentSession, SESSION_COOKIE},
        csrf::CSRF_COOKIE,
    },
    models::{
        session::{Session, StoredSession},
        user::User,
    },
    services::auth::{self as auth_service, LoginInput, RegisterInput},
    state::AppState,
    validation::input::validate,
};

/// Creates a cookie with the flags every auth cookie shares.
///
/// The CSRF cookie stays readable so the client can echo it in a header.
fn create_secure_cookie(
    name: &'static str,
    value: String,
    max_age_secs: i64,
    production: bool,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);

    if name != CSRF_COOKIE {
        cookie.set_http_only(true);
    }
    if production {
        cookie.set_secure(true);
    }

    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age_secs));
    cookie.set_path("/");

    cookie
}

fn expired_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_max_age(Duration::seconds(0));
    cookie.set_path("/");
    cookie
}

/// Stores a fresh session and CSRF token for `user` and sets both cookies.
async fn start_session(state: &AppState, cookies: &Cookies, user: &User) -> Result<Session> {
    let session_id = Uuid::new_v4();
    let session = Session::for_user(user);
    let stored = StoredSession::new(session.clone(), state.config.session_duration_days);

    state
        .sessions
        .save(session_id, &stored, state.config.session_ttl_secs())
        .await?;
    tracing::info!("✅ Session saved: session:{}", session_id);

    cookies.add(create_secure_cookie(
        SESSION_COOKIE,
        session_id.to_string(),
        state.config.session_ttl_secs() as i64,
        state.config.production,
    ));

    let csrf_token = generate_csrf_token();
    state
        .sessions
        .save_csrf(&csrf_token, CSRF_TOKEN_TTL_SECS)
        .await?;
    cookies.add(create_secure_cookie(
        CSRF_COOKIE,
        csrf_token,
        CSRF_TOKEN_TTL_SECS as i64,
        state.config.production,
    ));
    tracing::debug!("🔐 CSRF token issued for user: {}", user.id);

    Ok(session)
}

/// Handles user registration.
pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: std::result::Result<Json<RegisterInput>, JsonRejection>,
) -> Result<Response> {
    let Json(payload) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let payload = payload.normalized();
    tracing::info!("📝 Register attempt for: {}", payload.email);
    validate(&payload)?;

    let user = auth_service::create_user(state.db.as_ref(), payload).await?;
    let session = start_session(&state, &cookies, &user).await?;

    tracing::info!("✅ User registered: {}", user.id);
    Ok((StatusCode::CREATED, ok(session)).into_response())
}

/// Handles user login.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    ValidJson(payload): ValidJson<LoginInput>,
) -> Result<Response> {
    let user = auth_service::authenticate_user(state.db.as_ref(), payload).await?;
    let session = start_session(&state, &cookies, &user).await?;

    tracing::info!("✅ User logged in: {}", user.id);
    Ok(ok(session).into_response())
}

/// Handles user logout. Idempotent: a missing session still clears the cookies.
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    if let Some(session_id) = extract_session_token(&cookies) {
        state.sessions.remove(session_id).await?;
        tracing::info!("👋 Session removed: session:{}", session_id);
    }

    if let Some(csrf_cookie) = cookies.get(CSRF_COOKIE) {
        if let Err(e) = state.sessions.remove_csrf(csrf_cookie.value()).await {
            tracing::warn!("❌ Failed to drop CSRF token: {}", e);
        }
    }

    cookies.remove(expired_cookie(SESSION_COOKIE));
    cookies.remove(expired_cookie(CSRF_COOKIE));

    Ok(ok("Logout successful").into_response())
}

/// Returns the current session, or `null` when signed out.
pub async fn current_session(current: CurrentSession) -> Json<ApiResponse<Option<Session>>> {
    ok(current.0)
}
