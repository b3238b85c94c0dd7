//! Minimal server-rendered pages gated by the access guards.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    error::Result,
    middleware_layer::auth::CurrentSession,
    models::user::Role,
    services::{admin, dashboard},
    state::AppState,
};

/// Escapes text interpolated into HTML.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
        escape_html(title),
        body
    ))
}

pub async fn login_page(current: CurrentSession) -> Result<Html<String>> {
    current.require_no_auth()?;
    Ok(page(
        "Sign in",
        "<h1>Sign in</h1><form data-action=\"/api/auth/login\" method=\"post\">\
         <input name=\"email\" type=\"email\"><input name=\"password\" type=\"password\">\
         <button>Sign in</button></form><a href=\"/register\">Create an account</a>",
    ))
}

pub async fn register_page(current: CurrentSession) -> Result<Html<String>> {
    current.require_no_auth()?;
    Ok(page(
        "Create an account",
        "<h1>Create an account</h1><form data-action=\"/api/auth/register\" method=\"post\">\
         <input name=\"name\"><input name=\"email\" type=\"email\">\
         <input name=\"password\" type=\"password\"><button>Register</button></form>",
    ))
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Html<String>> {
    let show_admin = current.has_role(Role::Admin);
    let session = current.require_auth()?;
    let summary = dashboard::summary(state.db.as_ref(), session.user.id).await?;

    let admin_link = if show_admin {
        "<a href=\"/admin\">Administration</a>"
    } else {
        ""
    };

    Ok(page(
        "Dashboard",
        &format!(
            "<h1>Welcome, {}</h1><ul>\
             <li>Projects: {}</li><li>Contacts: {}</li><li>Accounts: {}</li>\
             <li>Notes: {}</li><li>Unread notifications: {}</li></ul>{}",
            escape_html(&session.user.name),
            summary.projects,
            summary.contacts,
            summary.accounts,
            summary.notes,
            summary.unread_notifications,
            admin_link
        ),
    ))
}

pub async fn admin_page(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Html<String>> {
    current.require_role(Role::Admin)?;
    let users = admin::list_users(state.db.as_ref()).await?;

    let rows: String = users
        .iter()
        .map(|user| {
            let roles: Vec<&str> = user.roles.iter().map(Role::as_str).collect();
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&user.name),
                escape_html(&user.email),
                roles.join(", ")
            )
        })
        .collect();

    Ok(page(
        "Administration",
        &format!(
            "<h1>Users</h1><table><tr><th>Name</th><th>Email</th><th>Roles</th></tr>{}</table>",
            rows
        ),
    ))
}

pub async fn moderation_page(current: CurrentSession) -> Result<Html<String>> {
    let session = current.require_role(Role::Moderator)?;
    Ok(page(
        "Moderation",
        &format!(
            "<h1>Moderation</h1><p>Signed in as {}</p>",
            escape_html(&session.user.email)
        ),
    ))
}

pub async fn unauthorized_page() -> Response {
    (
        StatusCode::FORBIDDEN,
        page(
            "Unauthorized",
            "<h1>Unauthorized</h1><p>You do not have access to this page.</p>\
             <a href=\"/dashboard\">Back to dashboard</a>",
        ),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }
}
