pub mod backend;
pub mod config_file;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use config_file::ConfigFile;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockBackend;

/// Concatenate per-page text in page order and trim the result.
///
/// No separator is inserted between pages; backends terminate each line
/// (including a page's last one) with `\n`, so page boundaries still fall
/// on line breaks.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
    }
    text.trim().to_string()
}
