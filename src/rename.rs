//! Apply a suggested name on disk

use crate::error::RenameError;
use crate::suggest::Suggestion;
use std::path::Path;

/// Outcome of [`apply_rename`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// Source and destination are the same path
    Unchanged,
}

/// Rename `old` to `new`, refusing to overwrite an existing destination
pub fn apply_rename(old: &Path, new: &Path) -> Result<RenameOutcome, RenameError> {
    if !old.exists() {
        return Err(RenameError::SourceNotFound(old.to_path_buf()));
    }

    if old == new {
        tracing::info!("[Rename] {} already has the suggested name", old.display());
        return Ok(RenameOutcome::Unchanged);
    }

    if new.exists() {
        return Err(RenameError::DestinationExists(new.to_path_buf()));
    }

    std::fs::rename(old, new).map_err(|source| RenameError::Io {
        from: old.to_path_buf(),
        to: new.to_path_buf(),
        source,
    })?;

    tracing::info!("[Rename] {} -> {}", old.display(), new.display());
    Ok(RenameOutcome::Renamed)
}

/// Move `source` to the suggested name unless only a suggestion was asked for.
///
/// A missing source cannot be renamed, so it always degrades to suggest-only.
/// Returns `None` when no rename was attempted.
pub fn rename_to_suggestion(
    source: &Path,
    suggestion: &Suggestion,
    suggest_only: bool,
) -> Result<Option<RenameOutcome>, RenameError> {
    if !source.exists() {
        tracing::warn!("Path {} not found.", source.display());
        return Ok(None);
    }
    if suggest_only {
        return Ok(None);
    }

    apply_rename(source, Path::new(&suggestion.name)).map(Some)
}
