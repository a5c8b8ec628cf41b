//! Refresh-cookie construction
//! The refresh token travels only in this cookie; the access token never does

use crate::auth::tokens::RefreshToken;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const REFRESH_COOKIE: &str = "refresh_token";

/// Build the protected refresh cookie: HTTP-only, SameSite=Strict, with a
/// max-age matching the refresh expiry. `secure` is disabled only for local
/// development over plain HTTP.
pub fn refresh_cookie(token: &RefreshToken, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token.as_str().to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(max_age_secs as i64))
        .build()
}

/// Build the removal cookie used by logout
pub fn clear_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
