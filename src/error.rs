//! Error types shared across the crate.
//!
//! Date resolution itself never fails: strategies log and decline. These
//! errors surface only from text extraction (caught by the content adapter),
//! configuration loading, explicit date parsing and the rename step.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to pull plain text out of a document
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No extractor is registered for this extension
    #[error("unsupported file type for text extraction: {0:?}")]
    Unsupported(Option<String>),

    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document format parser rejected the file
    #[error("failed to parse {format} document {path}: {message}")]
    Parse {
        format: &'static str,
        path: PathBuf,
        message: String,
    },

    /// The format parser panicked (malformed fonts, glyph tables, ...)
    #[error("{format} parser panicked on {path}")]
    Panicked { format: &'static str, path: PathBuf },
}

/// Errors surfaced to the command line layer
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    #[error("destination path already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("failed to rename {from} to {to}: {source}")]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}
