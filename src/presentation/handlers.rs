// HTTP request handlers
use crate::application::errors::DatasetError;
use crate::application::ingestion_service::Upload;
use crate::infrastructure::http_response::{accepts_brotli, error_response, respond_json};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Multipart field carrying the uploaded document
pub const UPLOAD_FIELD: &str = "jsonfile";

const NO_FILE_MESSAGE: &str = "No file uploaded or invalid file type.";

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Accept one JSON file and store it as a new dataset
pub async fn upload_dataset(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let compress = accepts_brotli(&headers);

    let upload = match read_upload(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return error_response(&DatasetError::Validation(NO_FILE_MESSAGE.to_string())),
        Err(UploadError::Multipart(e)) => return multipart_error_response(e),
        Err(UploadError::Dataset(e)) => return error_response(&e),
    };

    tracing::debug!(
        original_name = %upload.original_name,
        content_type = ?upload.content_type,
        bytes = upload.content.len(),
        "received upload"
    );

    match state.ingestion_service.ingest(upload).await {
        Ok(stored) => {
            let body = json!({
                "message": "File uploaded successfully",
                "file": stored,
            });
            respond_json(StatusCode::OK, &body, compress).await
        }
        Err(e) => error_response(&e),
    }
}

/// Return a stored dataset as parsed JSON
pub async fn get_dataset(
    Path(filename): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match state.retrieval_service.raw(&filename).await {
        Ok(document) => respond_json(StatusCode::OK, &document, compress).await,
        Err(e) => error_response(&e),
    }
}

/// Refuel events and fuel consumption for a stored dataset
pub async fn analyze_dataset(
    Path(filename): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match state.retrieval_service.analyze(&filename).await {
        Ok(result) => respond_json(StatusCode::OK, &result, compress).await,
        Err(e) => error_response(&e),
    }
}

enum UploadError {
    Multipart(MultipartError),
    Dataset(DatasetError),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::Multipart(err)
    }
}

/// Pull the single file out of the `jsonfile` field. Other fields are ignored;
/// a field without a filename is not a file.
async fn read_upload(mut multipart: Multipart) -> Result<Option<Upload>, UploadError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if upload.is_some() {
            return Err(UploadError::Dataset(DatasetError::Validation(format!(
                "only one file may be uploaded per request in field {UPLOAD_FIELD:?}"
            ))));
        }

        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await?;
        upload = Some(Upload {
            original_name,
            content_type,
            content,
        });
    }

    Ok(upload)
}

fn multipart_error_response(err: MultipartError) -> Response {
    let status = err.status();
    tracing::debug!("Rejected multipart upload ({}): {}", status, err);
    let body = Json(json!({
        "error": {
            "code": "multipart_error",
            "message": err.body_text(),
        }
    }));
    (status, body).into_response()
}
