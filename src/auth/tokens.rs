//! Token minting and verification
//! Implements the access token + refresh token pattern with two independent
//! signing secrets, one per token kind

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claim set shared by both token kinds
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Token kind ("access" or "refresh")
    pub token_use: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

/// A short-lived bearer credential. Returned in response bodies and presented
/// in the Authorization header; never placed in a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A long-lived credential used solely to mint new token pairs. Transported
/// only via the refresh cookie; the access guard can never accept one because
/// the two kinds are distinct types signed with distinct secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

const ACCESS_USE: &str = "access";
const REFRESH_USE: &str = "refresh";

/// Signs and verifies both token kinds
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_exp_secs: u64,
    refresh_exp_secs: u64,
}

impl TokenCodec {
    /// Create the codec from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let access_secret = config.security.access_token_secret.expose_secret();
        let refresh_secret = config.security.refresh_token_secret.expose_secret();

        // Ensure secrets are at least 32 bytes for HS256
        if access_secret.len() < 32 || refresh_secret.len() < 32 {
            return Err(AppError::Config(
                "Token signing secrets too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_exp_secs: config.security.access_token_exp_secs,
            refresh_exp_secs: config.security.refresh_token_exp_secs,
        })
    }

    /// Mint an access token for a user
    pub fn mint_access(&self, user_id: Uuid) -> Result<AccessToken, AppError> {
        self.mint(user_id, ACCESS_USE, self.access_exp_secs, &self.access_encoding)
            .map(AccessToken)
    }

    /// Mint a refresh token for a user
    pub fn mint_refresh(&self, user_id: Uuid) -> Result<RefreshToken, AppError> {
        self.mint(user_id, REFRESH_USE, self.refresh_exp_secs, &self.refresh_encoding)
            .map(RefreshToken)
    }

    /// Mint a fresh access + refresh pair
    pub fn mint_pair(&self, user_id: Uuid) -> Result<(AccessToken, RefreshToken), AppError> {
        Ok((self.mint_access(user_id)?, self.mint_refresh(user_id)?))
    }

    /// Verify an access token and return its subject. Any failure (bad
    /// signature, wrong kind, malformed, expired) collapses to `Unauthorized`.
    pub fn verify_access(&self, token: &str) -> Result<Uuid, AppError> {
        self.verify(token, ACCESS_USE, &self.access_decoding)
    }

    /// Verify a refresh token and return its subject
    pub fn verify_refresh(&self, token: &str) -> Result<Uuid, AppError> {
        self.verify(token, REFRESH_USE, &self.refresh_decoding)
    }

    /// Refresh cookie max-age, matching the refresh expiry
    pub fn refresh_max_age_secs(&self) -> u64 {
        self.refresh_exp_secs
    }

    fn mint(
        &self,
        user_id: Uuid,
        token_use: &str,
        exp_secs: u64,
        key: &EncodingKey,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(exp_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            token_use: token_use.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, key).map_err(|e| {
            tracing::error!("Failed to encode {} token: {:?}", token_use, e);
            AppError::Internal(format!("Failed to encode {} token: {}", token_use, e))
        })
    }

    fn verify(
        &self,
        token: &str,
        expected_use: &str,
        key: &DecodingKey,
    ) -> Result<Uuid, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock leeway: a token presented at its expiry instant is expired
        validation.leeway = 0;

        let claims = decode::<Claims>(token, key, &validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims;

        // exp == now counts as expired
        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Token expired at boundary");
            return Err(AppError::Unauthorized);
        }

        // The kind claim backs up the secret separation; a token minted under
        // one secret never verifies under the other anyway
        if claims.token_use != expected_use {
            tracing::debug!(
                "Token kind mismatch: expected '{}', got '{}'",
                expected_use,
                claims.token_use
            );
            return Err(AppError::Unauthorized);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{
        AiConfig, AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig,
        UploadsConfig,
    };
    use secrecy::Secret;

    /// Config literal shared by the auth unit tests
    pub(crate) fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:5000".to_string(),
                graceful_shutdown_timeout_secs: 30,
                cors_origin: "http://localhost:3000".to_string(),
            },
            database: DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                access_token_secret: Secret::new(
                    "access-secret-for-tests-min-32-chars!!".to_string(),
                ),
                refresh_token_secret: Secret::new(
                    "refresh-secret-for-tests-min-32-chars!".to_string(),
                ),
                access_token_exp_secs: 900,
                refresh_token_exp_secs: 604800,
                cookie_secure: false,
            },
            uploads: UploadsConfig {
                dir: "uploads".to_string(),
                max_size_bytes: 10 * 1024 * 1024,
            },
            ai: AiConfig {
                api_url: "https://generativelanguage.googleapis.com".to_string(),
                api_key: None,
                model: "gemini-pro".to_string(),
                timeout_secs: 30,
            },
        }
    }
}
