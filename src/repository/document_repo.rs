//! Document metadata repository

use crate::{
    error::AppError,
    models::document::{Document, NewDocument},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct DocumentRepository {
    db: PgPool,
}

impl DocumentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert metadata for a stored upload
    pub async fn insert(&self, doc: &NewDocument) -> Result<Document, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (user_id, name, doc_type, file_path, file_type, size, tags, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(doc.user_id)
        .bind(&doc.name)
        .bind(&doc.doc_type)
        .bind(&doc.file_path)
        .bind(&doc.file_type)
        .bind(doc.size)
        .bind(&doc.tags)
        .bind(&doc.description)
        .fetch_one(&self.db)
        .await?;

        Ok(document)
    }

    /// List the caller's documents, newest first
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE user_id = $1 ORDER BY upload_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(documents)
    }
}
