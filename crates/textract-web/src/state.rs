use std::path::PathBuf;
use std::sync::Arc;

use textract_core::PdfBackend;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub backend: Arc<dyn PdfBackend>,
    /// Directory scratch files are written to. Must exist.
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(backend: Arc<dyn PdfBackend>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            upload_dir: upload_dir.into(),
        }
    }
}
