use std::time::Duration;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use http::{header, HeaderName, HeaderValue, Method};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    config::Config,
    handlers::{admin, auth, categories, email_logs, notifications, pages, resources, tracking},
    middleware_layer::csrf::{verify_csrf, CSRF_HEADER},
    models::{account::Account, contact::Contact, note::Note, project::Project},
    repositories::store::StoredResource,
    state::AppState,
};

/// List/create on the collection, get/update/delete on `{collection}/{id}`.
fn resource_routes<R: StoredResource>(collection: &str) -> Router<AppState> {
    Router::new()
        .route(
            collection,
            get(resources::list::<R>).post(resources::create::<R>),
        )
        .route(
            &format!("{}/{{id}}", collection),
            get(resources::get::<R>)
                .put(resources::update::<R>)
                .delete(resources::delete::<R>),
        )
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("⚠️ Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let csrf_header = HeaderName::from_static(CSRF_HEADER);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::COOKIE,
            csrf_header.clone(),
        ])
        .allow_credentials(true)
        .expose_headers([csrf_header])
        .max_age(Duration::from_secs(86400))
}

/// Builds the full application router.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Router` ready to be served.
pub fn router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/login", get(pages::login_page))
        .route("/register", get(pages::register_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/admin", get(pages::admin_page))
        .route("/moderation", get(pages::moderation_page))
        .route("/unauthorized", get(pages::unauthorized_page));

    let tracking_routes = Router::new()
        .route("/track", get(tracking::track_without_id))
        .route("/track/", get(tracking::track_without_id))
        .route("/track/{log_id}", get(tracking::track_open));

    let public_api_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/session", get(auth::current_session));

    let protected_api_routes = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .merge(resource_routes::<Project>("/api/projects"))
        .merge(resource_routes::<Contact>("/api/contacts"))
        .merge(resource_routes::<Account>("/api/accounts"))
        .merge(resource_routes::<Note>("/api/notes"))
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            delete(categories::delete_category),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route(
            "/api/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route(
            "/api/notifications/{id}/read",
            post(notifications::mark_read),
        )
        .route(
            "/api/notifications/{id}",
            delete(notifications::delete_notification),
        )
        .route(
            "/api/email-logs",
            get(email_logs::list_email_logs).post(email_logs::create_email_log),
        )
        .route("/api/email-logs/{id}", get(email_logs::get_email_log))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/{id}/roles", put(admin::set_roles))
        .route("/api/admin/notifications", post(admin::send_notification))
        .route_layer(from_fn_with_state(state.clone(), verify_csrf));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(page_routes)
        .merge(tracking_routes)
        .merge(public_api_routes)
        .merge(protected_api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false))
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .with_state(state)
}
