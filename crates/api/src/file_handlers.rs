use axum::{Json, extract::Multipart, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
}

/// POST /uploadfile/ - accept a multipart upload and echo its filename.
/// The content itself is read and discarded; nothing is persisted.
pub async fn create_upload_file(mut multipart: Multipart) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("unnamed").to_string();

        match field.bytes().await {
            Ok(bytes) => {
                tracing::debug!(filename = %filename, size = bytes.len(), "received upload");
                return (StatusCode::OK, Json(UploadResponse { filename })).into_response();
            }
            Err(e) => {
                let error = ErrorResponse {
                    error: format!("Failed to read file data: {e}"),
                };
                return (StatusCode::BAD_REQUEST, Json(error)).into_response();
            }
        }
    }

    let error = ErrorResponse {
        error: "No file provided in request".to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}
