use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors only turn a file on disk into per-page text. Everything
/// around it (upload handling, scratch files, the HTTP surface) lives in
/// `textract-web`, so the native PDF library stays behind this seam.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page, in page order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError>;

    /// Extract the full text content of a PDF file.
    ///
    /// Pages are concatenated in order and the result is trimmed.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let pages = self.extract_pages(path)?;
        Ok(crate::join_pages(&pages))
    }
}
