//! File-backed state store.
//!
//! One JSON document per key inside a state directory. This is the
//! client's durable storage for tokens, the profile copy, and the lockout
//! snapshot, so the state survives process restarts.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use securticket_core::error::AppError;
use securticket_core::result::AppResult;

use super::StateStore;

/// Durable state store writing one file per key.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    /// Directory holding the state files.
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        // Keys are fixed identifiers chosen by this crate; reject anything
        // that could escape the state directory.
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(AppError::storage(format!("Invalid state key: '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn read(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                securticket_core::error::ErrorKind::Storage,
                format!("Failed to read state '{key}': {e}"),
                e,
            )),
        }
    }

    async fn write(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write to a sibling temp file and rename so a crash mid-write
        // cannot leave a torn document behind.
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(key, "Wrote state entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Removed state entry");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                securticket_core::error::ErrorKind::Storage,
                format!("Failed to remove state '{key}': {e}"),
                e,
            )),
        }
    }
}
