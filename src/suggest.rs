//! Suggestion orchestrator
//!
//! Combines the priority resolver with the sanitizer. Nothing here touches
//! the file on disk beyond what the date sources read.

use crate::config::Config;
use crate::resolver::PriorityResolver;
use crate::sanitize::sanitize_name;
use crate::sources::{Collaborators, Strategy};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A suggested file name and where its date came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Suggested path: original directory plus the new file name
    pub name: String,
    /// Winning strategy; `None` for an explicit date or when nothing was found
    pub strategy: Option<Strategy>,
    /// The date prefix, empty when no date was found
    pub date_prefix: String,
}

pub struct Suggester {
    resolver: PriorityResolver,
    date_format: String,
}

impl Suggester {
    pub fn new(config: &Config) -> Self {
        Self::with_collaborators(config, &Collaborators::default())
    }

    pub fn with_collaborators(config: &Config, collaborators: &Collaborators) -> Self {
        Self {
            resolver: PriorityResolver::new(config, collaborators),
            date_format: config.date_format.clone(),
        }
    }

    /// Suggest a new name for `path`.
    ///
    /// With `explicit_date` the date sources are skipped entirely and the
    /// original name is sanitized as is.
    pub fn suggest(&self, path: &Path, explicit_date: Option<NaiveDate>) -> Suggestion {
        let (date_prefix, candidate, strategy) = match explicit_date {
            Some(date) => (
                date.format(&self.date_format).to_string(),
                path.to_path_buf(),
                None,
            ),
            None => {
                let result = self.resolver.resolve(path);
                (result.date_string, result.candidate, result.strategy)
            }
        };

        let file_name = candidate
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let new_name = format!("{}{}", date_prefix, sanitize_name(&file_name));

        let suggested = match candidate.parent() {
            Some(dir) => dir.join(new_name),
            None => PathBuf::from(new_name),
        };

        Suggestion {
            name: suggested.to_string_lossy().into_owned(),
            strategy,
            date_prefix,
        }
    }
}

/// Suggest a new name for `path` with default configuration and collaborators
pub fn suggest_filename(path: &Path, explicit_date: Option<NaiveDate>) -> String {
    Suggester::new(&Config::default()).suggest(path, explicit_date).name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::PatternRecognizer;
    use crate::sources::fakes::{local, FakeExtractor, FakeFiles};
    use std::sync::Arc;

    #[test]
    fn test_name_dates() {
        let cases = [
            ("10 aug 1977 some file name.txt", "19770810_some-file-name.txt"),
            ("Reply 10 10 18.vie version 1.docx", "20181010_Reply.vie-version-1.docx"),
            ("Reply 10 10 18.vie version-1.docx", "20181010_Reply.vie_version-1.docx"),
            ("notes 12 March 15, 2021.txt", "20210315_notes-12.txt"),
            ("due 5 aug 10 1977 x.txt", "19770810_due-5-x.txt"),
        ];

        for (original, expected) in cases {
            assert_eq!(suggest_filename(Path::new(original), None), expected);
        }
    }

    #[test]
    fn test_explicit_date_bypasses_resolution() {
        let extractor = Arc::new(FakeExtractor::default());
        let files = Arc::new(FakeFiles::with("x.txt", None, local(2001, 1, 1)));
        let suggester = Suggester::with_collaborators(
            &Config::default(),
            &Collaborators {
                recognizer: Arc::new(PatternRecognizer::new()),
                extractor: extractor.clone(),
                files: files.clone(),
            },
        );

        let date = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        let suggestion = suggester.suggest(Path::new("10 aug 1977 old name.txt"), Some(date));

        // The name keeps its own date text, unmodified apart from sanitizing
        assert_eq!(suggestion.name, "20221231_10-aug-1977-old-name.txt");
        assert_eq!(suggestion.strategy, None);
        assert_eq!(extractor.calls(), 0);
        assert_eq!(files.calls(), 0);
    }

    #[test]
    fn test_nothing_found_only_sanitizes() {
        let suggestion = Suggester::new(&Config::default())
            .suggest(Path::new("/definitely/not/here/Bob's notes, final.txt"), None);

        assert_eq!(suggestion.name, "/definitely/not/here/Bobs-notes-final.txt");
        assert_eq!(suggestion.date_prefix, "");
        assert_eq!(suggestion.strategy, None);
    }

    #[test]
    fn test_directory_is_not_sanitized() {
        let suggestion = Suggester::new(&Config::default())
            .suggest(Path::new("/tmp/my docs/2020-01-31 tax return.pdf"), None);

        assert_eq!(suggestion.name, "/tmp/my docs/20200131_tax-return.pdf");
        assert_eq!(suggestion.strategy, Some(Strategy::NameDate));
    }

    #[test]
    fn test_file_date_for_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holiday photo.bin");
        std::fs::write(&path, b"\x00\x01").unwrap();

        let suggestion = Suggester::new(&Config::default()).suggest(&path, None);

        assert_eq!(suggestion.strategy, Some(Strategy::FileCreateDate));
        assert_eq!(suggestion.date_prefix.len(), "YYYYMMDD_".len());
        assert!(suggestion.name.ends_with("_holiday-photo.bin"));
    }

    #[test]
    fn test_suggestion_serializes_camel_case() {
        let suggestion = Suggestion {
            name: "20200101_a.txt".to_string(),
            strategy: Some(Strategy::ContentDate),
            date_prefix: "20200101_".to_string(),
        };
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["strategy"], "CONTENT_DATE");
        assert_eq!(json["datePrefix"], "20200101_");
    }
}
