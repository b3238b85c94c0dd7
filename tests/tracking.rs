mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request, StatusCode},
};
use common::{TestContext, TestResponse};
use dashboard::{
    error::{AppError, Result},
    models::{
        account::Account,
        contact::Contact,
        email_log::{EmailLog, EmailLogInput, EmailLogRead, EmailLogSummary, NewEmailLogRead},
        note::Note,
        project::Project,
        user::Role,
    },
    repositories::{
        memory::MemoryStore,
        store::{
            CategoryRepository, Database, EmailLogRepository, NotificationRepository,
            OwnedRepository, UserRepository,
        },
    },
    services::tracking::TRACKING_PIXEL,
};
use uuid::Uuid;

const FIREFOX_LINUX: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

fn assert_pixel(response: &TestResponse) {
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/gif");
    assert_eq!(
        response.headers[header::CACHE_CONTROL],
        "no-store, no-cache, must-revalidate, proxy-revalidate"
    );
    assert_eq!(response.headers[header::PRAGMA], "no-cache");
    assert_eq!(response.headers[header::EXPIRES], "0");
    assert_eq!(response.headers[header::CONTENT_LENGTH], "26");
    assert_eq!(response.body, TRACKING_PIXEL.to_vec());
}

async fn create_log(ctx: &TestContext, owner: Uuid) -> EmailLog {
    ctx.state
        .db
        .email_logs()
        .insert_email_log(
            owner,
            EmailLogInput {
                recipient: "client@example.com".to_string(),
                subject: "Quarterly report".to_string(),
            },
        )
        .await
        .unwrap()
}

async fn read_count(ctx: &TestContext, log_id: Uuid) -> usize {
    ctx.state
        .db
        .email_logs()
        .list_email_log_reads(log_id)
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn missing_and_valid_ids_get_identical_pixels() {
    let ctx = TestContext::new();
    let owner = ctx.sign_in("owner@example.com", &[Role::User]).await;
    let log = create_log(&ctx, owner.id()).await;

    let missing = ctx.get(&format!("/track/{}", Uuid::new_v4())).await;
    let garbage = ctx.get("/track/not-a-uuid").await;
    let bare = ctx.get("/track").await;
    let slash = ctx.get("/track/").await;
    let valid = ctx.get(&format!("/track/{}", log.id)).await;

    for response in [&missing, &garbage, &bare, &slash, &valid] {
        assert_pixel(response);
    }

    // Only the existing log gained a read
    assert_eq!(read_count(&ctx, log.id).await, 1);
}

#[tokio::test]
async fn open_records_client_details() {
    let ctx = TestContext::new();
    let owner = ctx.sign_in("owner@example.com", &[Role::User]).await;
    let log = create_log(&ctx, owner.id()).await;

    let mut request = Request::get(format!("/track/{}", log.id))
        .header(header::USER_AGENT, FIREFOX_LINUX)
        .header("x-real-ip", "203.0.113.9")
        .body(Body::empty())
        .unwrap();
    let peer: SocketAddr = "10.0.0.1:40000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));

    assert_pixel(&ctx.send(request).await);

    let reads = ctx
        .state
        .db
        .email_logs()
        .list_email_log_reads(log.id)
        .await
        .unwrap();
    assert_eq!(reads.len(), 1);
    assert_eq!(reads[0].ip_address, "203.0.113.9");
    assert_eq!(reads[0].browser.as_deref(), Some("Firefox"));
    assert_eq!(reads[0].operating_system.as_deref(), Some("Linux"));
}

#[tokio::test]
async fn peer_address_and_unknown_agent_are_fallbacks() {
    let ctx = TestContext::new();
    let owner = ctx.sign_in("owner@example.com", &[Role::User]).await;
    let log = create_log(&ctx, owner.id()).await;

    let mut request = Request::get(format!("/track/{}", log.id))
        .body(Body::empty())
        .unwrap();
    let peer: SocketAddr = "198.51.100.4:5000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    ctx.send(request).await;

    let reads = ctx
        .state
        .db
        .email_logs()
        .list_email_log_reads(log.id)
        .await
        .unwrap();
    assert_eq!(reads[0].ip_address, "198.51.100.4");
    assert_eq!(reads[0].browser, None);
    assert_eq!(reads[0].operating_system, None);
}

#[tokio::test]
async fn concurrent_opens_append_separate_rows() {
    let ctx = TestContext::new();
    let owner = ctx.sign_in("owner@example.com", &[Role::User]).await;
    let log = create_log(&ctx, owner.id()).await;
    let uri = format!("/track/{}", log.id);

    let (first, second) = tokio::join!(ctx.get(&uri), ctx.get(&uri));
    assert_pixel(&first);
    assert_pixel(&second);

    assert_eq!(read_count(&ctx, log.id).await, 2);
}

#[tokio::test]
async fn open_counts_show_in_the_owner_listing() {
    let ctx = TestContext::new();
    let owner = ctx.sign_in("owner@example.com", &[Role::User]).await;
    let log = create_log(&ctx, owner.id()).await;

    ctx.get(&format!("/track/{}", log.id)).await;
    ctx.get(&format!("/track/{}", log.id)).await;

    let listing = ctx.get_as(&owner, "/api/email-logs").await;
    assert_eq!(listing.status, StatusCode::OK);
    let body = listing.json();
    assert_eq!(body["data"][0]["id"], log.id.to_string());
    assert_eq!(body["data"][0]["read_count"], 2);

    let detail = ctx.get_as(&owner, &format!("/api/email-logs/{}", log.id)).await;
    let body = detail.json();
    assert_eq!(body["data"]["reads"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["data"]["tracking_url"],
        format!("http://localhost:3000/track/{}", log.id)
    );
}

/// Email-log repository whose every call fails, as during a database outage.
struct UnavailableEmailLogs;

fn outage<T>() -> Result<T> {
    Err(AppError::Internal("database unavailable".to_string()))
}

#[async_trait]
impl EmailLogRepository for UnavailableEmailLogs {
    async fn insert_email_log(&self, _: Uuid, _: EmailLogInput) -> Result<EmailLog> {
        outage()
    }
    async fn list_email_logs(&self, _: Uuid) -> Result<Vec<EmailLogSummary>> {
        outage()
    }
    async fn find_owned_email_log(&self, _: Uuid, _: Uuid) -> Result<Option<EmailLog>> {
        outage()
    }
    async fn find_email_log(&self, _: Uuid) -> Result<Option<EmailLog>> {
        outage()
    }
    async fn insert_email_log_read(&self, _: NewEmailLogRead) -> Result<EmailLogRead> {
        outage()
    }
    async fn list_email_log_reads(&self, _: Uuid) -> Result<Vec<EmailLogRead>> {
        outage()
    }
}

struct OutageStore {
    inner: MemoryStore,
    email_logs: UnavailableEmailLogs,
}

impl Database for OutageStore {
    fn users(&self) -> &dyn UserRepository {
        self.inner.users()
    }
    fn projects(&self) -> &dyn OwnedRepository<Project> {
        self.inner.projects()
    }
    fn contacts(&self) -> &dyn OwnedRepository<Contact> {
        self.inner.contacts()
    }
    fn accounts(&self) -> &dyn OwnedRepository<Account> {
        self.inner.accounts()
    }
    fn notes(&self) -> &dyn OwnedRepository<Note> {
        self.inner.notes()
    }
    fn categories(&self) -> &dyn CategoryRepository {
        self.inner.categories()
    }
    fn notifications(&self) -> &dyn NotificationRepository {
        self.inner.notifications()
    }
    fn email_logs(&self) -> &dyn EmailLogRepository {
        &self.email_logs
    }
}

#[tokio::test]
async fn storage_outage_still_serves_the_pixel() {
    let ctx = TestContext::with_database(Arc::new(OutageStore {
        inner: MemoryStore::new(),
        email_logs: UnavailableEmailLogs,
    }));

    let response = ctx.get(&format!("/track/{}", Uuid::new_v4())).await;
    assert_pixel(&response);
}
