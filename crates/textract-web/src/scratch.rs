//! Per-request scratch files.
//!
//! An upload is written to a uniquely named file inside the upload
//! directory and removed when the [`ScratchFile`] is dropped, whichever
//! way the request ends. The client's filename never reaches the
//! filesystem, so two uploads of `report.pdf` cannot clobber each other.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

const PREFIX: &str = "upload-";
const SUFFIX: &str = ".pdf";

pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Write `data` to a fresh scratch file in `dir`.
    pub fn create(dir: &Path, data: &[u8]) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile_in(dir)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        tracing::debug!(path = %self.file.path().display(), "removing scratch file");
    }
}
