mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use dashboard::models::user::Role;
use serde_json::json;

#[tokio::test]
async fn project_listing_is_scoped_to_the_caller() {
    let ctx = TestContext::new();
    let alice = ctx.sign_in("alice@example.com", &[Role::User]).await;
    let bob = ctx.sign_in("bob@example.com", &[Role::User]).await;

    for name in ["Apollo", "Gemini"] {
        let response = ctx
            .call_as(&alice, Method::POST, "/api/projects", Some(json!({ "name": name })))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
    ctx.call_as(&bob, Method::POST, "/api/projects", Some(json!({ "name": "Mercury" })))
        .await;

    let listing = ctx.get_as(&alice, "/api/projects").await.json();
    let names: Vec<&str> = listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|project| project["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gemini", "Apollo"]);
    assert_eq!(listing["data"][0]["status"], "active");
}

#[tokio::test]
async fn foreign_records_look_missing() {
    let ctx = TestContext::new();
    let alice = ctx.sign_in("alice@example.com", &[Role::User]).await;
    let bob = ctx.sign_in("bob@example.com", &[Role::User]).await;

    let created = ctx
        .call_as(
            &alice,
            Method::POST,
            "/api/contacts",
            Some(json!({ "name": "Grace", "email": "grace@example.com" })),
        )
        .await
        .json();
    let uri = format!("/api/contacts/{}", created["data"]["id"].as_str().unwrap());

    assert_eq!(ctx.get_as(&bob, &uri).await.status, StatusCode::NOT_FOUND);
    let update = ctx
        .call_as(&bob, Method::PUT, &uri, Some(json!({ "name": "Mallory" })))
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
    assert_eq!(
        ctx.call_as(&bob, Method::DELETE, &uri, None).await.status,
        StatusCode::NOT_FOUND
    );

    let still_there = ctx.get_as(&alice, &uri).await.json();
    assert_eq!(still_there["data"]["name"], "Grace");
}

#[tokio::test]
async fn crud_round_trip_for_accounts() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("ops@example.com", &[Role::User]).await;

    let created = ctx
        .call_as(
            &user,
            Method::POST,
            "/api/accounts",
            Some(json!({ "name": "Initech", "industry": "Software" })),
        )
        .await
        .json();
    let uri = format!("/api/accounts/{}", created["data"]["id"].as_str().unwrap());

    let updated = ctx
        .call_as(
            &user,
            Method::PUT,
            &uri,
            Some(json!({ "name": "Initrode", "industry": "Consulting" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["data"]["name"], "Initrode");

    let deleted = ctx.call_as(&user, Method::DELETE, &uri, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(ctx.get_as(&user, &uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("ops@example.com", &[Role::User]).await;

    let empty_name = ctx
        .call_as(&user, Method::POST, "/api/projects", Some(json!({ "name": "" })))
        .await;
    assert_eq!(empty_name.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_name.json()["success"], false);

    let bad_email = ctx
        .call_as(
            &user,
            Method::POST,
            "/api/contacts",
            Some(json!({ "name": "Eve", "email": "nope" })),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let bad_status = ctx
        .call_as(
            &user,
            Method::POST,
            "/api/projects",
            Some(json!({ "name": "X", "status": "paused" })),
        )
        .await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn categories_list_defaults_before_own_rows() {
    let ctx = TestContext::new();
    let alice = ctx.sign_in("alice@example.com", &[Role::User]).await;
    let bob = ctx.sign_in("bob@example.com", &[Role::User]).await;

    for name in ["Zeta", "Alpha"] {
        ctx.call_as(&alice, Method::POST, "/api/categories", Some(json!({ "name": name })))
            .await;
    }
    ctx.call_as(&bob, Method::POST, "/api/categories", Some(json!({ "name": "Bobs" })))
        .await;

    let listing = ctx.get_as(&alice, "/api/categories").await.json();
    let names: Vec<&str> = listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|category| category["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["General", "Personal", "Work", "Alpha", "Zeta"]);
}

#[tokio::test]
async fn default_categories_cannot_be_deleted() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("alice@example.com", &[Role::User]).await;

    let listing = ctx.get_as(&user, "/api/categories").await.json();
    let default_id = listing["data"][0]["id"].as_str().unwrap().to_string();

    let response = ctx
        .call_as(&user, Method::DELETE, &format!("/api/categories/{}", default_id), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notifications_can_be_read_and_deleted() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("alice@example.com", &[Role::User]).await;

    for title in ["First", "Second"] {
        ctx.state
            .db
            .notifications()
            .insert_notification(dashboard::models::notification::NewNotification {
                user_id: user.id(),
                title: title.to_string(),
                message: "hello".to_string(),
            })
            .await
            .unwrap();
    }

    let inbox = ctx.get_as(&user, "/api/notifications").await.json();
    assert_eq!(inbox["data"][0]["title"], "Second");
    let first_id = inbox["data"][1]["id"].as_str().unwrap().to_string();

    let marked = ctx
        .call_as(&user, Method::POST, &format!("/api/notifications/{}/read", first_id), None)
        .await;
    assert_eq!(marked.status, StatusCode::OK);

    let all = ctx
        .call_as(&user, Method::POST, "/api/notifications/read-all", None)
        .await;
    assert_eq!(all.json()["data"], 1);

    let deleted = ctx
        .call_as(&user, Method::DELETE, &format!("/api/notifications/{}", first_id), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    let inbox = ctx.get_as(&user, "/api/notifications").await.json();
    assert_eq!(inbox["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn email_log_creation_returns_tracking_url() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("sales@example.com", &[Role::User]).await;

    let response = ctx
        .call_as(
            &user,
            Method::POST,
            "/api/email-logs",
            Some(json!({ "recipient": "lead@example.com", "subject": "Proposal" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    let id = body["data"]["id"].as_str().unwrap();
    assert_eq!(
        body["data"]["tracking_url"],
        format!("http://localhost:3000/track/{}", id)
    );
    assert_eq!(body["data"]["reads"], json!([]));
}

#[tokio::test]
async fn whitespace_only_names_are_rejected() {
    let ctx = TestContext::new();
    let user = ctx.sign_in("alice@example.com", &[Role::User]).await;

    let category = ctx
        .call_as(&user, Method::POST, "/api/categories", Some(json!({ "name": "   " })))
        .await;
    assert_eq!(category.status, StatusCode::BAD_REQUEST);
    assert_eq!(category.json()["success"], false);

    let project = ctx
        .call_as(&user, Method::POST, "/api/projects", Some(json!({ "name": " \t " })))
        .await;
    assert_eq!(project.status, StatusCode::BAD_REQUEST);

    // Surrounding whitespace is trimmed, not rejected
    let padded = ctx
        .call_as(&user, Method::POST, "/api/categories", Some(json!({ "name": "  Clients " })))
        .await;
    assert_eq!(padded.status, StatusCode::CREATED);
    assert_eq!(padded.json()["data"]["name"], "Clients");

    let listing = ctx.get_as(&user, "/api/categories").await.json();
    let own: Vec<&str> = listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|category| category["is_default"] == false)
        .map(|category| category["name"].as_str().unwrap())
        .collect();
    assert_eq!(own, vec!["Clients"]);
}
