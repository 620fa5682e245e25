use axum::extract::Multipart;

use crate::error::ApiError;

/// Name of the multipart field carrying the PDF.
pub const FILE_FIELD: &str = "pdf";

/// An uploaded file with its data and client-supplied name.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Pull the `pdf` file part out of a multipart upload.
///
/// Only parts that carry a `filename` count as files; a plain `pdf` text
/// field is treated like no upload at all. The first file part wins and
/// every other field is drained and ignored.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from)?
    {
        let is_file_part = field.name() == Some(FILE_FIELD) && field.file_name().is_some();

        if is_file_part && file.is_none() {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(ApiError::from)?
                .to_vec();
            file = Some(UploadedFile { filename, data });
        } else {
            // Ignore unknown fields
            let _ = field.bytes().await;
        }
    }

    let file = file.ok_or(ApiError::MissingFile)?;
    if file.filename.is_empty() {
        return Err(ApiError::EmptyFileName);
    }

    Ok(file)
}
