// Resume handling: local extraction and normalization into the scoring payload.

pub mod extractor;
pub mod normalizer;
pub mod vocabulary;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::resume::extractor::{extract_or_empty, ResumeProfile};

const UPLOADS_DIR: &str = "uploads";

/// Local resume extraction as seen by the recommendation flow.
#[async_trait]
pub trait ResumeReader: Send + Sync {
    /// Missing or undecodable files give an empty profile. `Err` is reserved
    /// for unexpected failures.
    async fn read_profile(&self, path: &Path) -> anyhow::Result<ResumeProfile>;
}

/// Reads resumes from disk with the built-in extractor.
pub struct FileResumeReader;

#[async_trait]
impl ResumeReader for FileResumeReader {
    async fn read_profile(&self, path: &Path) -> anyhow::Result<ResumeProfile> {
        Ok(extract_or_empty(path).await?)
    }
}

/// Resolves a stored resume path to a file on disk.
///
/// Absolute paths are used as-is. Relative paths already rooted at `uploads/`
/// resolve against `upload_root`; bare file names live under `upload_root/uploads/`.
pub fn resolve_resume_path(upload_root: &Path, stored: &str) -> PathBuf {
    let stored_path = Path::new(stored);
    if stored_path.is_absolute() {
        stored_path.to_path_buf()
    } else if stored_path.starts_with(UPLOADS_DIR) {
        upload_root.join(stored_path)
    } else {
        upload_root.join(UPLOADS_DIR).join(stored_path)
    }
}
