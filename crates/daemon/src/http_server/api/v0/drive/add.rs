use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use common::workspace::WorkspaceError;

use crate::auth::Caller;
use crate::ServiceState;

use super::DriveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUploadResult {
    pub filename: String,
    pub key: Option<String>,
    pub content_type: String,
    pub size: usize,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResponse {
    pub directory: String,
    pub files: Vec<FileUploadResult>,
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
}

/// Upload one or more files into a directory.
///
/// Multipart form: a `directory` field plus any number of `file` fields.
/// Existing objects at the same key are overwritten without warning.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AddError> {
    let mut directory: Option<String> = None;
    let mut files: Vec<(String, String, Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AddError::Multipart(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "directory" => {
                directory = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AddError::Multipart(e.to_string()))?,
                );
            }
            "file" | "files" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AddError::InvalidRequest("file field has no filename".into()))?;
                let content_type = field.content_type().map(str::to_string).unwrap_or_else(|| {
                    mime_guess::from_path(&filename)
                        .first_or_octet_stream()
                        .to_string()
                });

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AddError::Multipart(e.to_string()))?;
                files.push((filename, content_type, data));
            }
            other => {
                tracing::warn!("ignoring unknown multipart field: {}", other);
            }
        }
    }

    let directory =
        directory.ok_or_else(|| AddError::InvalidRequest("directory is required".into()))?;
    if files.is_empty() {
        return Err(AddError::InvalidRequest(
            "at least one file is required".into(),
        ));
    }

    let workspace = state.workspace(caller.namespace);

    let mut results = Vec::new();
    let mut successful = 0;
    let mut failed = 0;

    for (filename, content_type, data) in files {
        let size = data.len();
        match workspace
            .upload(&directory, &filename, data, &content_type)
            .await
        {
            Ok(key) => {
                tracing::debug!(key = %key, size, "file uploaded");
                results.push(FileUploadResult {
                    filename,
                    key: Some(key),
                    content_type,
                    size,
                    success: true,
                    error: None,
                });
                successful += 1;
            }
            Err(e) => {
                tracing::error!(filename = %filename, "upload failed: {}", e);
                results.push(FileUploadResult {
                    filename,
                    key: None,
                    content_type,
                    size,
                    success: false,
                    error: Some(e.to_string()),
                });
                failed += 1;
            }
        }
    }

    if successful == 0 {
        return Err(AddError::InvalidRequest(
            "all files failed to upload".into(),
        ));
    }

    Ok(Json(AddResponse {
        directory,
        total_files: successful + failed,
        successful_files: successful,
        failed_files: failed,
        files: results,
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("multipart error: {0}")]
    Multipart(String),
    #[error(transparent)]
    Workspace(WorkspaceError),
}

impl From<WorkspaceError> for AddError {
    fn from(err: WorkspaceError) -> Self {
        Self::Workspace(err)
    }
}

impl IntoResponse for AddError {
    fn into_response(self) -> Response {
        match self {
            AddError::InvalidRequest(msg) | AddError::Multipart(msg) => (
                http::StatusCode::BAD_REQUEST,
                format!("Bad request: {}", msg),
            )
                .into_response(),
            AddError::Workspace(e) => DriveError(e).into_response(),
        }
    }
}
