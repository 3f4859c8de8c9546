//! FILE_CREATE_DATE: file system timestamps, the terminal fallback.
//!
//! Creation time is not available on every platform or file system; the
//! last-modified time stands in for it there.

use super::{DateSource, Resolution, Strategy};
use crate::dates::MatchedDate;
use chrono::{DateTime, Local};
use std::path::Path;
use std::sync::Arc;

/// Timestamps of a file, in local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub created: Option<DateTime<Local>>,
    pub modified: DateTime<Local>,
}

/// Read-only file system queries
pub trait FileStat: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn times(&self, path: &Path) -> std::io::Result<FileTimes>;
}

/// [`FileStat`] over `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileStat for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn times(&self, path: &Path) -> std::io::Result<FileTimes> {
        let metadata = std::fs::metadata(path)?;
        let modified = DateTime::<Local>::from(metadata.modified()?);
        let created = metadata.created().ok().map(DateTime::<Local>::from);

        Ok(FileTimes { created, modified })
    }
}

pub struct FileSystemDateSource {
    files: Arc<dyn FileStat>,
}

impl FileSystemDateSource {
    pub fn new(files: Arc<dyn FileStat>) -> Self {
        Self { files }
    }
}

impl DateSource for FileSystemDateSource {
    fn strategy(&self) -> Strategy {
        Strategy::FileCreateDate
    }

    fn attempt(&self, path: &Path) -> Option<Resolution> {
        if !self.files.exists(path) {
            tracing::debug!("[FileDate] Skipping missing file {}", path.display());
            return None;
        }

        let times = match self.files.times(path) {
            Ok(times) => times,
            Err(e) => {
                tracing::warn!("[FileDate] Failed to stat {}: {}", path.display(), e);
                return None;
            }
        };

        let timestamp = match times.created {
            Some(created) => created,
            None => {
                tracing::debug!(
                    "[FileDate] No creation time for {}, using modified time",
                    path.display()
                );
                times.modified
            }
        };

        Some(Resolution {
            strategy: Strategy::FileCreateDate,
            date: MatchedDate {
                date: timestamp.date_naive(),
                time: Some(timestamp.time()),
                offset: Some(*timestamp.offset()),
            },
            renamed: None,
        })
    }
}
