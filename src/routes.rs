//! Route registration
//! Builds the API router and applies middleware layers

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{handlers, middleware::AppState};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public endpoints (health probes)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // Session endpoints; refresh and logout operate on the cookie, not the
    // bearer header, so none of these sit behind the access guard
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route("/api/auth/logout", post(handlers::auth::logout));

    // Everything below requires a valid access token
    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/quiz",
            post(handlers::quiz::submit).get(handlers::quiz::get_own),
        )
        .route(
            "/api/documents/upload",
            post(handlers::document::upload)
                .layer(DefaultBodyLimit::max(state.config.uploads.max_size_bytes as usize)),
        )
        .route("/api/documents", get(handlers::document::list))
        .route("/api/ai/chat", post(handlers::ai::chat))
        .layer(axum::middleware::from_fn_with_state(
            state.tokens.clone(),
            crate::auth::middleware::access_guard,
        ));

    // Credentialed CORS for the browser frontend; origin validated at startup
    let cors_origin = state
        .config
        .server
        .cors_origin
        .parse::<HeaderValue>()
        .expect("CORS origin validated at startup");
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads.dir))
        .layer(cors)
        .layer(axum::middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
