//! Document locker models

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Allowed document categories
pub const ALLOWED_DOC_TYPES: [&str; 6] = [
    "certificate",
    "transcript",
    "resume",
    "portfolio",
    "recommendation",
    "other",
];

/// Stored document metadata; the file itself lives under the uploads dir
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub doc_type: String,
    pub file_path: String,
    pub file_type: String,
    pub size: i64,
    pub upload_date: DateTime<Utc>,
    pub encrypted: bool,
    pub shared: bool,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

/// New document metadata assembled from a multipart upload
#[derive(Debug)]
pub struct NewDocument {
    pub user_id: Uuid,
    pub name: String,
    pub doc_type: String,
    pub file_path: String,
    pub file_type: String,
    pub size: i64,
    pub tags: Vec<String>,
    pub description: Option<String>,
}
