//! Document locker HTTP handlers

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::document::{NewDocument, ALLOWED_DOC_TYPES},
    repository::DocumentRepository,
};
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use std::path::Path;
use std::sync::Arc;

/// Upload a document: file bytes to the uploads dir, metadata to the store
pub async fn upload(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file: Option<(String, String, axum::body::Bytes)> = None;
    let mut doc_type: Option<String> = None;
    let mut tags: Vec<String> = Vec::new();
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "document" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
                file = Some((original_name, content_type, data));
            }
            "type" => doc_type = Some(read_text(field).await?),
            "tags" => {
                tags = read_text(field)
                    .await?
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
            }
            "description" => description = Some(read_text(field).await?),
            _ => {}
        }
    }

    let (original_name, content_type, data) =
        file.ok_or_else(|| AppError::bad_request("Missing document file"))?;
    let doc_type = doc_type.ok_or_else(|| AppError::bad_request("Missing document type"))?;

    if !ALLOWED_DOC_TYPES.contains(&doc_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Invalid document type. Must be one of: {}",
            ALLOWED_DOC_TYPES.join(", ")
        )));
    }

    let stored_path = store_file(&state, auth.user_id, &original_name, &data).await?;

    let document = DocumentRepository::new(state.db.clone())
        .insert(&NewDocument {
            user_id: auth.user_id,
            name: original_name,
            doc_type,
            file_path: stored_path,
            file_type: content_type,
            size: data.len() as i64,
            tags,
            description,
        })
        .await?;

    Ok(Json(document))
}

/// List the caller's documents, newest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let documents = DocumentRepository::new(state.db.clone())
        .list_by_user(auth.user_id)
        .await?;

    Ok(Json(documents))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart field: {}", e)))
}

/// Write the upload under the configured dir as `<user_id>-<millis><ext>`
async fn store_file(
    state: &AppState,
    user_id: uuid::Uuid,
    original_name: &str,
    data: &[u8],
) -> Result<String, AppError> {
    let filename = stored_filename(user_id, original_name);

    let dir = Path::new(&state.config.uploads.dir);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create uploads dir: {}", e)))?;

    let path = dir.join(&filename);

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

    Ok(path.to_string_lossy().into_owned())
}

/// Stored name: `<user_id>-<millis><ext>`, keeping the original extension only
fn stored_filename(user_id: uuid::Uuid, original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    format!(
        "{}-{}{}",
        user_id,
        chrono::Utc::now().timestamp_millis(),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_stored_filename_keeps_extension() {
        let user_id = Uuid::new_v4();

        let name = stored_filename(user_id, "transcript.pdf");
        assert!(name.starts_with(&user_id.to_string()));
        assert!(name.ends_with(".pdf"));

        let name = stored_filename(user_id, "archive.tar.gz");
        assert!(name.ends_with(".gz"));
    }

    #[test]
    fn test_stored_filename_without_extension() {
        let user_id = Uuid::new_v4();

        let name = stored_filename(user_id, "resume");
        assert!(name.starts_with(&user_id.to_string()));
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_stored_filename_never_reuses_caller_name() {
        let user_id = Uuid::new_v4();

        // The original name contributes only its extension
        let name = stored_filename(user_id, "../../../etc/passwd.txt");
        assert!(!name.contains("passwd"));
        assert!(!name.contains('/'));
        assert!(name.ends_with(".txt"));
    }
}
