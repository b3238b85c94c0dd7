use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::{
    error::Result,
    guards,
    models::{session::Session, user::Role},
    state::AppState,
};

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Extracts the session token from the request cookies.
///
/// # Arguments
///
/// * `cookies` - The request cookies.
///
/// # Returns
///
/// An `Option` containing the session ID if found.
pub fn extract_session_token(cookies: &Cookies) -> Option<Uuid> {
    cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Resolves the session of the current request.
///
/// Never fails: a missing cookie, an unknown id, an expired session, a user
/// that no longer exists or a store error all yield `None`. Identity and roles
/// are re-read from the user record on every call, so role changes apply to
/// live sessions immediately.
pub async fn get_session(state: &AppState, cookies: &Cookies) -> Option<Session> {
    let session_id = extract_session_token(cookies)?;

    let stored = match state.sessions.load(session_id).await {
        Ok(Some(stored)) if stored.is_expired() => {
            tracing::warn!("❌ Session expired for user: {}", stored.session.user.id);
            drop_session(state, session_id).await;
            return None;
        }
        Ok(Some(stored)) => stored,
        Ok(None) => {
            tracing::debug!("🔑 Unknown session_id: {}", session_id);
            return None;
        }
        Err(e) => {
            tracing::warn!("❌ Session lookup failed: {}", e);
            return None;
        }
    };

    let user_id = stored.session.user.id;
    match state.db.users().find_user_by_id(user_id).await {
        Ok(Some(user)) => {
            tracing::debug!("✅ User authenticated: {}", user.id);
            Some(Session::for_user(&user))
        }
        Ok(None) => {
            tracing::warn!("❌ Session {} names a deleted user: {}", session_id, user_id);
            drop_session(state, session_id).await;
            None
        }
        Err(e) => {
            tracing::warn!("❌ User lookup failed for session {}: {}", session_id, e);
            None
        }
    }
}

async fn drop_session(state: &AppState, session_id: Uuid) {
    if let Err(e) = state.sessions.remove(session_id).await {
        tracing::warn!("❌ Failed to drop session {}: {}", session_id, e);
    }
}

/// The session of the current request, if any.
///
/// Handlers pass it through one of the guards before touching data.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    pub fn require_auth(self) -> Result<Session> {
        guards::require_auth(self.0).into_result()
    }

    pub fn require_no_auth(&self) -> Result<()> {
        guards::require_no_auth(self.0.as_ref()).into_result()
    }

    pub fn has_role(&self, role: Role) -> bool {
        guards::has_role(self.0.as_ref(), role)
    }

    pub fn require_role(self, role: Role) -> Result<Session> {
        guards::require_role(self.0, role).into_result()
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let cookies = match Cookies::from_request_parts(parts, state).await {
            Ok(cookies) => cookies,
            Err(_) => {
                tracing::error!("❌ Cookie layer missing; treating request as anonymous");
                return Ok(CurrentSession(None));
            }
        };

        Ok(CurrentSession(get_session(state, &cookies).await))
    }
}
