// ============================================================================
// Launchpad API - Router
// File: crates/launchpad-api/src/router.rs
// ============================================================================

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{admin, applications, auth, deals, health};
use crate::state::AppState;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    base.allow_origin(allowed)
}

pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me));

    let application_routes = Router::new()
        .route("/", post(applications::submit).get(applications::list_mine))
        .route("/pending", post(applications::park))
        .route("/pending/claim", post(applications::claim))
        .route("/{id}", get(applications::get_one));

    let deal_routes = Router::new()
        .route("/", get(deals::list_public).post(deals::create))
        .route("/mine", get(deals::list_mine))
        .route(
            "/{id}",
            get(deals::get_one).put(deals::update).delete(deals::delete),
        )
        .route("/{id}/submit", post(deals::submit));

    let admin_routes = Router::new()
        .route("/applications", get(admin::list_applications))
        .route("/applications/{id}/status", patch(admin::update_application_status))
        .route("/deals", get(admin::list_deals))
        .route("/deals/{id}/approve", post(admin::approve_deal))
        .route("/deals/{id}/reject", post(admin::reject_deal))
        .route("/deals/{id}/active", patch(admin::set_deal_active))
        .route("/users", get(admin::list_users));

    let cors = cors_layer(&state.config.app.cors_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/applications", application_routes)
        .nest("/api/v1/deals", deal_routes)
        .nest("/api/v1/admin", admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
