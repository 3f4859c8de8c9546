//! Date sources, one per strategy in the priority chain.
//!
//! Each source either declines (`None`) or produces a [`Resolution`]. Only the
//! name source rewrites the candidate path.

mod content;
mod filesystem;
mod metadata;
mod name;

pub use content::ContentDateSource;
pub use filesystem::{FileStat, FileSystemDateSource, FileTimes, OsFileSystem};
pub use metadata::MetadataDateSource;
pub use name::NameDateSource;

use crate::config::Config;
use crate::dates::{DateRecognizer, MatchedDate, PatternRecognizer};
use crate::extract::{DocumentParser, TextExtractor};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifier of a date strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    NameDate,
    MetadataCreateDate,
    ContentDate,
    FileCreateDate,
}

/// Strategies in the order they are tried: intentional, user-given dates
/// first, incidental file system timestamps last.
pub const PRIORITY_CHAIN: [Strategy; 4] = [
    Strategy::NameDate,
    Strategy::MetadataCreateDate,
    Strategy::ContentDate,
    Strategy::FileCreateDate,
];

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::NameDate => "NAME_DATE",
            Strategy::MetadataCreateDate => "METADATA_CREATE_DATE",
            Strategy::ContentDate => "CONTENT_DATE",
            Strategy::FileCreateDate => "FILE_CREATE_DATE",
        };
        f.write_str(name)
    }
}

/// A date produced by a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub strategy: Strategy,
    pub date: MatchedDate,
    /// Replacement path when the source consumed part of the name
    pub renamed: Option<PathBuf>,
}

/// One step of the priority chain
pub trait DateSource: Send + Sync {
    fn strategy(&self) -> Strategy;

    /// Try to find a date for `path`. `None` means declined.
    fn attempt(&self, path: &Path) -> Option<Resolution>;
}

/// External collaborators shared by the sources
#[derive(Clone)]
pub struct Collaborators {
    pub recognizer: Arc<dyn DateRecognizer>,
    pub extractor: Arc<dyn TextExtractor>,
    pub files: Arc<dyn FileStat>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            recognizer: Arc::new(PatternRecognizer::new()),
            extractor: Arc::new(DocumentParser::new()),
            files: Arc::new(OsFileSystem),
        }
    }
}

/// Build the source for one strategy
pub fn source_for(strategy: Strategy, config: &Config, with: &Collaborators) -> Box<dyn DateSource> {
    match strategy {
        Strategy::NameDate => Box::new(NameDateSource::new(with.recognizer.clone(), config.day_first)),
        Strategy::MetadataCreateDate => Box::new(MetadataDateSource::new(with.files.clone())),
        Strategy::ContentDate => Box::new(ContentDateSource::new(
            with.recognizer.clone(),
            with.extractor.clone(),
            with.files.clone(),
            config.content_match_limit,
            config.day_first,
        )),
        Strategy::FileCreateDate => Box::new(FileSystemDateSource::new(with.files.clone())),
    }
}
