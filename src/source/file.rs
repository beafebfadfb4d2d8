//! File-based data source.
//!
//! Reads the statistics document from a local JSON file. This is the
//! original mode of operation where the exporter writes snapshots next to
//! the hub and this source polls that path.
//!
//! The source tracks the file's modification time so an unchanged file is
//! not re-parsed every cycle; the cached snapshot is returned instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;

use super::{SnapshotSource, SourceError, StatusSnapshot};

/// A data source that reads snapshots from a JSON file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_modified: Option<SystemTime>,
    cached: Option<StatusSnapshot>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_modified: None,
            cached: None,
        }
    }

    /// Returns the path being polled.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&self) -> Result<StatusSnapshot, SourceError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| SourceError::Read(e.to_string()))?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn fetch(&mut self) -> Result<StatusSnapshot, SourceError> {
        let current_modified = self.modified_time();

        // Serve the cached snapshot while the file is unchanged
        if let (Some(cached), Some(last), Some(current)) =
            (&self.cached, &self.last_modified, &current_modified)
        {
            if current <= last {
                return Ok(cached.clone());
            }
        }

        let snapshot = self.read_file()?;
        self.last_modified = current_modified;
        self.cached = Some(snapshot.clone());
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
