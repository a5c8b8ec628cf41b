//! Authentication HTTP handlers

use crate::{
    auth::cookies,
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::auth::{AuthResponse, LoginRequest, RegisterRequest},
    services::auth_service::IssuedSession,
};
use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;
use serde_json::json;
use std::sync::Arc;

/// Register a new user; responds with the access token and sets the refresh
/// cookie
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.auth_service.register(req).await?;

    Ok(issue_response(&state, jar, session))
}

/// Authenticate an existing user
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.auth_service.login(req).await?;

    Ok(issue_response(&state, jar, session))
}

/// Rotate the session from the refresh cookie: a brand-new pair is minted and
/// the cookie overwritten
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let refresh_token = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    let session = state.auth_service.refresh(&refresh_token)?;

    Ok(issue_response(&state, jar, session))
}

/// Clear the refresh cookie. Stateless: previously issued tokens stay valid
/// until their natural expiry.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(cookies::clear_refresh_cookie()),
        Json(json!({"message": "Logged out successfully"})),
    )
}

/// Current user profile, minus the password hash
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service.current_user(auth.user_id).await?;

    Ok(Json(user))
}

/// Transport placement for a freshly issued session: refresh token into the
/// protected cookie, access token into the JSON body
fn issue_response(
    state: &AppState,
    jar: CookieJar,
    session: IssuedSession,
) -> (CookieJar, Json<AuthResponse>) {
    let cookie = cookies::refresh_cookie(
        &session.refresh,
        state.tokens.refresh_max_age_secs(),
        state.config.security.cookie_secure,
    );

    (
        jar.add(cookie),
        Json(AuthResponse {
            token: session.access.into_inner(),
        }),
    )
}
