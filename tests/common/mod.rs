#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use dashboard::{
    app,
    config::Config,
    crypto::csrf::{generate_csrf_token, CSRF_TOKEN_TTL_SECS},
    models::{
        session::{Session, StoredSession},
        user::{NewUser, Role, User},
    },
    repositories::{
        memory::MemoryStore,
        session::{MemorySessionStore, SessionStore},
        store::Database,
    },
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// A signed-in user with the cookies a browser would send.
pub struct TestUser {
    pub user: User,
    pub session_id: Uuid,
    pub csrf_token: String,
}

impl TestUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    pub fn cookie_header(&self) -> String {
        format!("session_id={}; csrf_token={}", self.session_id, self.csrf_token)
    }
}

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

// Shared test context
pub struct TestContext {
    pub state: AppState,
    pub router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_database(Arc::new(MemoryStore::new()))
    }

    pub fn with_database(db: Arc<dyn Database>) -> Self {
        let state = AppState::with_stores(
            Config::default(),
            db,
            Arc::new(MemorySessionStore::new()),
        );
        let router = app::router(state.clone());
        Self { state, router }
    }

    /// Creates a user and a live session without going through Argon2.
    pub async fn sign_in(&self, email: &str, roles: &[Role]) -> TestUser {
        let user = self
            .state
            .db
            .users()
            .create_user(NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap().to_string(),
                password_hash: "not-a-real-hash".to_string(),
                roles: roles.to_vec(),
            })
            .await
            .unwrap();

        let session_id = Uuid::new_v4();
        let stored = StoredSession::new(Session::for_user(&user), 7);
        self.state
            .sessions
            .save(session_id, &stored, 3600)
            .await
            .unwrap();

        let csrf_token = generate_csrf_token();
        self.state
            .sessions
            .save_csrf(&csrf_token, CSRF_TOKEN_TTL_SECS)
            .await
            .unwrap();

        TestUser {
            user,
            session_id,
            csrf_token,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Anonymous GET.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// GET carrying the user's cookies.
    pub async fn get_as(&self, user: &TestUser, uri: &str) -> TestResponse {
        self.send(
            Request::get(uri)
                .header(header::COOKIE, user.cookie_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Mutating request carrying the user's cookies and the CSRF header.
    pub async fn call_as(
        &self,
        user: &TestUser,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, user.cookie_header())
            .header("x-csrf-token", &user.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(match body {
                Some(value) => Body::from(value.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        self.send(request).await
    }
}
