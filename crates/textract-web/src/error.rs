use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use textract_core::BackendError;

use crate::models::ErrorBody;

/// Errors a request can end in.
///
/// Client input problems map to 400, everything that goes wrong after the
/// upload was accepted maps to 500. The body is always `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No PDF file uploaded")]
    MissingFile,

    #[error("Empty file name")]
    EmptyFileName,

    #[error("Failed to read form field: {0}")]
    Multipart(String),

    #[error("Uploaded file is too large")]
    TooLarge,

    /// Backend messages are passed through verbatim.
    #[error("{0}")]
    Extraction(#[from] BackendError),

    #[error("Failed to write scratch file: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::EmptyFileName | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Extraction(_) | ApiError::Scratch(_) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::TooLarge
        } else {
            ApiError::Multipart(e.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "rejected request");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
