// HTTP response utilities for JSON (+ optional Brotli) encoding
use crate::application::errors::DatasetError;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use tokio::io::AsyncReadExt;

/// Seconds a client should wait before retrying after a storage failure
const RETRY_AFTER_SECS: &str = "3";

/// Whether the client advertised Brotli support. `br;q=0` is a refusal.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(accepts_coding_br))
        .unwrap_or(false)
}

fn accepts_coding_br(entry: &str) -> bool {
    let mut parts = entry.split(';');
    let coding = parts.next().unwrap_or("").trim();
    if !coding.eq_ignore_ascii_case("br") {
        return false;
    }
    let refused = parts.any(|param| {
        param
            .trim()
            .strip_prefix("q=")
            .and_then(|q| q.trim().parse::<f32>().ok())
            .is_some_and(|q| q <= 0.0)
    });
    !refused
}

/// Serialize a value as JSON, optionally compressed with Brotli
pub async fn json_response<T: Serialize>(
    status: StatusCode,
    data: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let json_bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (body_bytes, content_encoding) = if compress {
        let mut encoder = BrotliEncoder::new(std::io::Cursor::new(&json_bytes));
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(
            "Compressed: {} → {} bytes",
            json_bytes.len(),
            compressed.len()
        );
        (compressed, Some("br"))
    } else {
        (json_bytes, None)
    };

    let mut response_builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body_bytes.len());

    if let Some(encoding) = content_encoding {
        response_builder = response_builder
            .header(header::CONTENT_ENCODING, encoding)
            .header(header::VARY, "accept-encoding");
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Respond with a JSON body, falling back to a bare status if encoding fails
pub async fn respond_json<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response<Body> {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub fn error_status(err: &DatasetError) -> StatusCode {
    match err {
        DatasetError::Validation(_) | DatasetError::Parse { .. } => StatusCode::BAD_REQUEST,
        DatasetError::NotFound(_) => StatusCode::NOT_FOUND,
        DatasetError::StorageWrite { .. } | DatasetError::StorageRead { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

fn error_code(err: &DatasetError) -> &'static str {
    match err {
        DatasetError::Validation(_) => "validation_error",
        DatasetError::Parse { .. } => "parse_error",
        DatasetError::NotFound(_) => "not_found",
        DatasetError::StorageWrite { .. } => "storage_write_error",
        DatasetError::StorageRead { .. } => "storage_read_error",
    }
}

/// Translate a use-case failure into a JSON error response
pub fn error_response(err: &DatasetError) -> Response<Body> {
    let status = error_status(err);
    if status.is_server_error() {
        tracing::error!("Dataset request failed: {}", err);
    } else {
        tracing::debug!("Dataset request rejected: {}", err);
    }

    let body = axum::Json(json!({
        "error": {
            "code": error_code(err),
            "message": err.to_string(),
        }
    }));
    let mut response = (status, body).into_response();
    if err.is_retryable() {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
    }
    response
}
