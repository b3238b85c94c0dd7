//! Access-control preconditions evaluated at the start of every page and action.
//!
//! Guards never perform I/O: they inspect the session resolved for the current
//! request and return an [`Outcome`]. The HTTP boundary turns a redirect into a
//! `303 See Other` and `NotFound` into a 404.

use crate::{
    error::{AppError, Result},
    models::{session::Session, user::Role},
};

/// Where unauthenticated requests are sent.
pub const LOGIN_ROUTE: &str = "/login";
/// Where authenticated requests lacking a non-admin role are sent.
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";
/// Landing page for authenticated users.
pub const LANDING_ROUTE: &str = "/dashboard";

/// Result of evaluating a guard.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The request may proceed.
    Ok(T),
    /// The request must be sent to another route.
    Redirect(&'static str),
    /// The route must look like it does not exist.
    NotFound,
}

impl<T> Outcome<T> {
    /// Converts the outcome into a `Result` so callers can short-circuit with `?`.
    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Ok(value) => Ok(value),
            Outcome::Redirect(path) => Err(AppError::Redirect(path.to_string())),
            Outcome::NotFound => Err(AppError::NotFound),
        }
    }
}

/// Passes the session through, or redirects to the login page.
pub fn require_auth(session: Option<Session>) -> Outcome<Session> {
    match session {
        Some(session) => Outcome::Ok(session),
        None => Outcome::Redirect(LOGIN_ROUTE),
    }
}

/// Lets anonymous requests through; signed-in users go to the landing page.
pub fn require_no_auth(session: Option<&Session>) -> Outcome<()> {
    match session {
        Some(_) => Outcome::Redirect(LANDING_ROUTE),
        None => Outcome::Ok(()),
    }
}

/// Whether the current session holds `role`. `false` without a session.
pub fn has_role(session: Option<&Session>, role: Role) -> bool {
    session.is_some_and(|session| session.has_role(role))
}

/// Requires a session holding `role`.
///
/// A missing `ADMIN` role yields `NotFound` so admin routes do not reveal that
/// they exist; any other missing role redirects to the unauthorized page.
pub fn require_role(session: Option<Session>, role: Role) -> Outcome<Session> {
    let session = match require_auth(session) {
        Outcome::Ok(session) => session,
        Outcome::Redirect(path) => return Outcome::Redirect(path),
        Outcome::NotFound => return Outcome::NotFound,
    };

    if session.has_role(role) {
        return Outcome::Ok(session);
    }

    tracing::warn!("🚫 User {} lacks role {}", session.user.id, role);
    match role {
        Role::Admin => Outcome::NotFound,
        _ => Outcome::Redirect(UNAUTHORIZED_ROUTE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionUser;
    use uuid::Uuid;

    fn session_with(roles: &[Role]) -> Session {
        Session {
            user: SessionUser {
                id: Uuid::new_v4(),
                email: "grace@example.com".to_string(),
                name: "Grace".to_string(),
                email_verified: true,
                image: None,
            },
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn require_auth_redirects_anonymous_to_login() {
        assert_eq!(require_auth(None), Outcome::Redirect("/login"));
        let session = session_with(&[Role::User]);
        assert_eq!(require_auth(Some(session.clone())), Outcome::Ok(session));
    }

    #[test]
    fn require_no_auth_redirects_signed_in_users() {
        let session = session_with(&[]);
        assert_eq!(require_no_auth(Some(&session)), Outcome::Redirect("/dashboard"));
        assert_eq!(require_no_auth(None), Outcome::Ok(()));
    }

    #[test]
    fn has_role_is_false_without_session() {
        assert!(!has_role(None, Role::User));
        let session = session_with(&[Role::Moderator]);
        assert!(has_role(Some(&session), Role::Moderator));
        assert!(!has_role(Some(&session), Role::Admin));
    }

    #[test]
    fn missing_admin_role_is_not_found() {
        let session = session_with(&[Role::User, Role::Moderator]);
        assert_eq!(require_role(Some(session), Role::Admin), Outcome::NotFound);
    }

    #[test]
    fn missing_other_role_redirects_to_unauthorized() {
        let session = session_with(&[Role::User]);
        assert_eq!(
            require_role(Some(session), Role::Moderator),
            Outcome::Redirect("/unauthorized")
        );
    }

    #[test]
    fn require_role_checks_authentication_first() {
        assert_eq!(require_role(None, Role::Admin), Outcome::Redirect("/login"));
        assert_eq!(require_role(None, Role::User), Outcome::Redirect("/login"));
    }

    #[test]
    fn holder_of_role_passes() {
        let session = session_with(&[Role::Admin]);
        assert_eq!(require_role(Some(session.clone()), Role::Admin), Outcome::Ok(session));
    }

    #[test]
    fn outcome_maps_to_app_error() {
        assert!(matches!(
            Outcome::<()>::Redirect("/login").into_result(),
            Err(AppError::Redirect(path)) if path == "/login"
        ));
        assert!(matches!(Outcome::<()>::NotFound.into_result(), Err(AppError::NotFound)));
    }
}
