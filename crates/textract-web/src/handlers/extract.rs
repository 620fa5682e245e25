use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use textract_core::PdfBackend;

use crate::error::ApiError;
use crate::models::ExtractResponse;
use crate::scratch::ScratchFile;
use crate::state::AppState;
use crate::upload;

/// `POST /extract-text`: save the upload, run the backend, return the text.
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    // A body that isn't multipart carries no file part.
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "request is not multipart");
        ApiError::MissingFile
    })?;
    let upload = upload::parse_multipart(multipart).await?;
    tracing::info!(filename = %upload.filename, bytes = upload.data.len(), "received file");

    let scratch = ScratchFile::create(&state.upload_dir, &upload.data)?;
    let text = extract_blocking(state.backend.clone(), scratch).await?;

    tracing::info!(filename = %upload.filename, chars = text.chars().count(), "extracted text");
    Ok(Json(ExtractResponse {
        extracted_text: text,
    }))
}

/// Run the backend on the blocking pool (MuPDF is not async).
///
/// The scratch file moves into the task and is dropped there, so it is
/// removed even when the client goes away before extraction finishes.
async fn extract_blocking(
    backend: Arc<dyn PdfBackend>,
    scratch: ScratchFile,
) -> Result<String, ApiError> {
    let result = tokio::task::spawn_blocking(move || {
        let text = backend.extract_text(scratch.path());
        drop(scratch);
        text
    })
    .await
    .map_err(|e| ApiError::Task(e.to_string()))?;

    Ok(result?)
}
