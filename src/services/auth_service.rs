//! Session issuance: registration, login, refresh rotation

use crate::{
    auth::password::PasswordHasher,
    auth::tokens::{AccessToken, RefreshToken, TokenCodec},
    error::AppError,
    models::auth::{LoginRequest, RegisterRequest},
    models::user::{Role, UserResponse},
    repository::user_repo::{NewUser, UserRepository},
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// A freshly minted token pair. The caller decides transport: access token in
/// the body, refresh token in the protected cookie.
pub struct IssuedSession {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

pub struct AuthService {
    db: PgPool,
    tokens: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(db: PgPool, tokens: Arc<TokenCodec>) -> Self {
        Self { db, tokens }
    }

    /// Register a new user and issue their first session
    pub async fn register(&self, req: RegisterRequest) -> Result<IssuedSession, AppError> {
        req.validate()?;

        if Role::parse(&req.role).is_none() {
            return Err(AppError::validation_field(
                "role",
                &format!("must be one of: {}", Role::ALLOWED.join(", ")),
            ));
        }

        let user_repo = UserRepository::new(self.db.clone());

        if user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(req.password.clone()).await?;

        // The unique index catches a registration race; the repository maps
        // it to the same conflict as the pre-check
        let user = user_repo
            .create(&NewUser {
                name: req.name,
                email: req.email,
                password_hash,
                age: req.age,
                education: req.education,
                location: req.location,
                role: req.role,
                parent_email: req.parent_email,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.issue(user.id)
    }

    /// Authenticate by email and password. Unknown email and wrong password
    /// are deliberately indistinguishable.
    pub async fn login(&self, req: LoginRequest) -> Result<IssuedSession, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(req.password, user.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.issue(user.id)
    }

    /// Rotate a session from a refresh token. The subject is not re-checked
    /// against the user store, and earlier refresh tokens stay valid until
    /// their own expiry: the scheme is fully stateless.
    pub fn refresh(&self, refresh_token: &str) -> Result<IssuedSession, AppError> {
        let user_id = self.tokens.verify_refresh(refresh_token)?;

        tracing::debug!(user_id = %user_id, "Session refreshed");

        self.issue(user_id)
    }

    /// Fetch the authenticated caller's profile
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;

        Ok(UserResponse::from(user))
    }

    fn issue(&self, user_id: Uuid) -> Result<IssuedSession, AppError> {
        let (access, refresh) = self.tokens.mint_pair(user_id)?;
        Ok(IssuedSession { access, refresh })
    }
}

/// Argon2 hashing is deliberately slow; keep it off the async request path
async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || PasswordHasher::new().hash(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || PasswordHasher::new().verify(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))
}
