//! Priority resolver
//!
//! Walks the date sources in chain order and stops at the first one that
//! produces a date. Later sources are never consulted once one succeeds.

use crate::config::Config;
use crate::sources::{source_for, Collaborators, DateSource, Strategy, PRIORITY_CHAIN};
use std::path::{Path, PathBuf};

/// Outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Formatted date prefix, empty when no source produced a date
    pub date_string: String,
    /// Path whose file name gets sanitized
    pub candidate: PathBuf,
    /// Strategy that produced the date
    pub strategy: Option<Strategy>,
}

pub struct PriorityResolver {
    sources: Vec<Box<dyn DateSource>>,
    date_format: String,
}

impl PriorityResolver {
    /// Resolver over the standard chain with the given collaborators
    pub fn new(config: &Config, collaborators: &Collaborators) -> Self {
        let sources = PRIORITY_CHAIN
            .iter()
            .map(|strategy| source_for(*strategy, config, collaborators))
            .collect();

        Self::with_sources(sources, &config.date_format)
    }

    /// Resolver over an explicit list of sources, tried in the given order
    pub fn with_sources(sources: Vec<Box<dyn DateSource>>, date_format: &str) -> Self {
        Self {
            sources,
            date_format: date_format.to_string(),
        }
    }

    pub fn strategies(&self) -> Vec<Strategy> {
        self.sources.iter().map(|s| s.strategy()).collect()
    }

    pub fn resolve(&self, path: &Path) -> ResolutionResult {
        for source in &self.sources {
            let Some(resolution) = source.attempt(path) else {
                tracing::debug!("[Resolver] {} declined for {}", source.strategy(), path.display());
                continue;
            };

            tracing::info!(
                "[Resolver] {} found {} for {}",
                resolution.strategy,
                resolution.date.date,
                path.display()
            );
            return ResolutionResult {
                date_string: resolution.date.date.format(&self.date_format).to_string(),
                candidate: resolution.renamed.unwrap_or_else(|| path.to_path_buf()),
                strategy: Some(resolution.strategy),
            };
        }

        tracing::info!("[Resolver] No date found for {}", path.display());
        ResolutionResult {
            date_string: String::new(),
            candidate: path.to_path_buf(),
            strategy: None,
        }
    }
}
