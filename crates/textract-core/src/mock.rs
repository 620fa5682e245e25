//! Mock extraction backend for testing.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{BackendError, PdfBackend};

/// Magic prefix every PDF file starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Page separator understood by [`MockBackend`] (ASCII form feed).
pub const PAGE_BREAK: char = '\u{0C}';

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Files are read from disk like a real backend would. Anything that does
/// not start with `%PDF-` is rejected as an open error; otherwise the rest
/// of the first line is ignored and the remaining UTF-8 text is split into
/// pages on form feeds. This lets tests build "PDFs" as plain strings:
///
/// ```text
/// %PDF-mock
/// first page text\x0csecond page text
/// ```
pub struct MockBackend {
    /// When set, every call fails with this message.
    failure: Option<String>,
    call_count: AtomicUsize,
    last_path: Mutex<Option<PathBuf>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            failure: None,
            call_count: AtomicUsize::new(0),
            last_path: Mutex::new(None),
        }
    }

    /// Create a mock that fails every extraction with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Build the bytes of a mock document with the given pages.
    pub fn document(pages: &[&str]) -> Vec<u8> {
        let mut doc = String::from("%PDF-mock\n");
        doc.push_str(&pages.join(&PAGE_BREAK.to_string()));
        doc.into_bytes()
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Path passed to the most recent extraction call.
    pub fn last_path(&self) -> Option<PathBuf> {
        self.last_path.lock().ok().and_then(|p| p.clone())
    }
}

impl PdfBackend for MockBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_path.lock() {
            *last = Some(path.to_path_buf());
        }

        if let Some(ref message) = self.failure {
            return Err(BackendError::ExtractionError(message.clone()));
        }

        let data = std::fs::read(path)?;
        if !data.starts_with(PDF_MAGIC) {
            return Err(BackendError::OpenError("no objects found".into()));
        }

        let text = String::from_utf8(data)
            .map_err(|e| BackendError::ExtractionError(format!("invalid text: {}", e)))?;
        let body = text.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
        if body.is_empty() {
            return Err(BackendError::ExtractionError("document has no pages".into()));
        }

        Ok(body
            .split(PAGE_BREAK)
            .map(|page| format!("{}\n", page))
            .collect())
    }
}
