mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use dashboard::models::user::Role;

#[tokio::test]
async fn anonymous_dashboard_redirects_to_login() {
    let ctx = TestContext::new();

    let response = ctx.get("/dashboard").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn signed_in_user_is_sent_away_from_login_and_register() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("ada@example.com", &[Role::User]).await;

    for page in ["/login", "/register"] {
        let response = ctx.get_as(&user, page).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{page}");
        assert_eq!(response.location(), Some("/dashboard"));
    }

    let anonymous = ctx.get("/login").await;
    assert_eq!(anonymous.status, StatusCode::OK);
}

#[tokio::test]
async fn dashboard_shows_counts_for_the_user() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("ada@example.com", &[Role::User]).await;

    ctx.call_as(
        &user,
        Method::POST,
        "/api/notes",
        Some(serde_json::json!({ "title": "Groceries" })),
    )
    .await;

    let response = ctx.get_as(&user, "/dashboard").await;
    assert_eq!(response.status, StatusCode::OK);
    let html = String::from_utf8(response.body).unwrap();
    assert!(html.contains("Welcome, ada"));
    assert!(html.contains("Notes: 1"));
    assert!(html.contains("Projects: 0"));
    assert!(!html.contains("/admin"));

    let admin = ctx.sign_in("root@example.com", &[Role::Admin]).await;
    let html = String::from_utf8(ctx.get_as(&admin, "/dashboard").await.body).unwrap();
    assert!(html.contains("href=\"/admin\""));
}

#[tokio::test]
async fn non_admin_gets_not_found_on_admin_routes() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("user@example.com", &[Role::User, Role::Moderator]).await;

    let page = ctx.get_as(&user, "/admin").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert_eq!(page.location(), None);

    let api = ctx.get_as(&user, "/api/admin/users").await;
    assert_eq!(api.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_moderator_is_redirected_to_unauthorized() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("user@example.com", &[Role::User]).await;

    let response = ctx.get_as(&user, "/moderation").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/unauthorized"));

    let unauthorized = ctx.get_as(&user, "/unauthorized").await;
    assert_eq!(unauthorized.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn anonymous_role_routes_redirect_to_login() {
    let ctx = TestContext::new();

    for page in ["/admin", "/moderation"] {
        let response = ctx.get(page).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{page}");
        assert_eq!(response.location(), Some("/login"));
    }
}

#[tokio::test]
async fn role_holders_reach_their_pages() {
    let ctx = TestContext::new();
    let admin = ctx.sign_in("root@example.com", &[Role::Admin]).await;
    let moderator = ctx.sign_in("mod@example.com", &[Role::Moderator]).await;

    let admin_page = ctx.get_as(&admin, "/admin").await;
    assert_eq!(admin_page.status, StatusCode::OK);
    let html = String::from_utf8(admin_page.body).unwrap();
    assert!(html.contains("mod@example.com"));

    assert_eq!(ctx.get_as(&moderator, "/moderation").await.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_manages_roles_and_notifications() {
    let ctx = TestContext::new();
    let admin = ctx.sign_in("root@example.com", &[Role::Admin]).await;
    let user = ctx.sign_in("user@example.com", &[Role::User]).await;

    // Step 1: Promote the user
    let response = ctx
        .call_as(
            &admin,
            Method::PUT,
            &format!("/api/admin/users/{}/roles", user.id()),
            Some(serde_json::json!({ "roles": ["USER", "MODERATOR"] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json()["data"]["roles"],
        serde_json::json!(["USER", "MODERATOR"])
    );

    // Step 2: An admin cannot drop their own ADMIN role
    let response = ctx
        .call_as(
            &admin,
            Method::PUT,
            &format!("/api/admin/users/{}/roles", admin.id()),
            Some(serde_json::json!({ "roles": ["USER"] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Step 3: Notify the user
    let response = ctx
        .call_as(
            &admin,
            Method::POST,
            "/api/admin/notifications",
            Some(serde_json::json!({
                "user_id": user.id(),
                "title": "Welcome",
                "message": "You are now a moderator"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let inbox = ctx.get_as(&user, "/api/notifications").await.json();
    assert_eq!(inbox["data"][0]["title"], "Welcome");
    assert_eq!(inbox["data"][0]["is_read"], false);
}

#[tokio::test]
async fn demoted_admin_loses_access_on_the_next_request() {
    let ctx = TestContext::new();
    let root = ctx.sign_in("root@example.com", &[Role::Admin]).await;
    let deputy = ctx.sign_in("deputy@example.com", &[Role::Admin]).await;

    assert_eq!(ctx.get_as(&deputy, "/admin").await.status, StatusCode::OK);

    // Step 1: Demote the deputy while their session is live
    let response = ctx
        .call_as(
            &root,
            Method::PUT,
            &format!("/api/admin/users/{}/roles", deputy.id()),
            Some(serde_json::json!({ "roles": ["USER"] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Step 2: The same cookie no longer opens admin routes
    let page = ctx.get_as(&deputy, "/admin").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    let api = ctx.get_as(&deputy, "/api/admin/users").await;
    assert_eq!(api.status, StatusCode::NOT_FOUND);

    let session = ctx.get_as(&deputy, "/api/auth/session").await.json();
    assert_eq!(session["data"]["roles"], serde_json::json!(["USER"]));
}

#[tokio::test]
async fn promotion_applies_to_the_live_session() {
    let ctx = TestContext::new();
    let root = ctx.sign_in("root@example.com", &[Role::Admin]).await;
    let user = ctx.sign_in("user@example.com", &[Role::User]).await;

    assert_eq!(ctx.get_as(&user, "/moderation").await.status, StatusCode::SEE_OTHER);

    ctx.call_as(
        &root,
        Method::PUT,
        &format!("/api/admin/users/{}/roles", user.id()),
        Some(serde_json::json!({ "roles": ["USER", "MODERATOR"] })),
    )
    .await;

    assert_eq!(ctx.get_as(&user, "/moderation").await.status, StatusCode::OK);
}
