//! User repository

use crate::{error::AppError, models::user::User};
use sqlx::PgPool;
use uuid::Uuid;

/// Fields required to insert a new user
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub education: String,
    pub location: String,
    pub role: String,
    pub parent_email: Option<String>,
}

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Find a user by email (the login key)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// Insert a new user. A race lost against a concurrent registration for
    /// the same email surfaces as the same conflict as the pre-check.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, age, education, location, role, parent_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.age)
        .bind(&new_user.education)
        .bind(&new_user.location)
        .bind(&new_user.role)
        .bind(&new_user.parent_email)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                AppError::Conflict("User already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(user)
    }
}
