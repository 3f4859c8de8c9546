//! METADATA_CREATE_DATE: creation date embedded in document metadata.
//!
//! No metadata reader is wired in yet, so this source always declines once
//! it has confirmed the file exists. A reader plugs in here without changing
//! the chain.

use super::{DateSource, FileStat, Resolution, Strategy};
use std::path::Path;
use std::sync::Arc;

pub struct MetadataDateSource {
    files: Arc<dyn FileStat>,
}

impl MetadataDateSource {
    pub fn new(files: Arc<dyn FileStat>) -> Self {
        Self { files }
    }
}

impl DateSource for MetadataDateSource {
    fn strategy(&self) -> Strategy {
        Strategy::MetadataCreateDate
    }

    fn attempt(&self, path: &Path) -> Option<Resolution> {
        if !self.files.exists(path) {
            tracing::debug!("[MetadataDate] Skipping missing file {}", path.display());
            return None;
        }

        tracing::debug!("[MetadataDate] No metadata reader for {}", path.display());
        None
    }
}
