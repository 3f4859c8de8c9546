//! CONTENT_DATE: the earliest date written in the document body.

use super::{DateSource, FileStat, Resolution, Strategy};
use crate::dates::{find_dates, DateRecognizer};
use crate::extract::TextExtractor;
use std::path::Path;
use std::sync::Arc;

pub struct ContentDateSource {
    recognizer: Arc<dyn DateRecognizer>,
    extractor: Arc<dyn TextExtractor>,
    files: Arc<dyn FileStat>,
    match_limit: usize,
    day_first: bool,
}

impl ContentDateSource {
    pub fn new(
        recognizer: Arc<dyn DateRecognizer>,
        extractor: Arc<dyn TextExtractor>,
        files: Arc<dyn FileStat>,
        match_limit: usize,
        day_first: bool,
    ) -> Self {
        Self {
            recognizer,
            extractor,
            files,
            match_limit,
            day_first,
        }
    }
}

impl DateSource for ContentDateSource {
    fn strategy(&self) -> Strategy {
        Strategy::ContentDate
    }

    fn attempt(&self, path: &Path) -> Option<Resolution> {
        if !self.files.exists(path) {
            tracing::debug!("[ContentDate] Skipping missing file {}", path.display());
            return None;
        }

        let text = match self.extractor.extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("[ContentDate] Text extraction failed: {}", e);
                return None;
            }
        };

        // Strict: a stray "10 aug" in body text is not worth a guess
        let matches = find_dates(
            self.recognizer.as_ref(),
            &text,
            true,
            self.day_first,
            Some(self.match_limit),
        );
        tracing::debug!(
            "[ContentDate] {} candidate(s) in {}: {:?}",
            matches.len(),
            path.display(),
            matches.iter().map(|m| m.source.as_str()).collect::<Vec<_>>()
        );

        let first = matches.into_iter().next()?;
        Some(Resolution {
            strategy: Strategy::ContentDate,
            date: first.value,
            renamed: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::PatternRecognizer;
    use crate::sources::fakes::{local, FakeExtractor, FakeFiles};
    use chrono::NaiveDate;

    fn source(extractor: Arc<FakeExtractor>, files: Arc<FakeFiles>) -> ContentDateSource {
        ContentDateSource::new(Arc::new(PatternRecognizer::new()), extractor, files, 4, false)
    }

    #[test]
    fn test_first_date_in_document_wins() {
        let extractor = Arc::new(FakeExtractor::with(
            "minutes.docx",
            "Minutes\nMeeting held 3 March 2020, follow up due 2020-04-01",
        ));
        let files = Arc::new(FakeFiles::with("minutes.docx", None, local(2021, 1, 1)));

        let resolution = source(extractor, files)
            .attempt(Path::new("minutes.docx"))
            .unwrap();

        assert_eq!(resolution.strategy, Strategy::ContentDate);
        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(2020, 3, 3).unwrap());
        assert_eq!(resolution.renamed, None);
    }

    #[test]
    fn test_partial_dates_in_content_are_ignored() {
        let extractor = Arc::new(FakeExtractor::with("notes.txt", "see you on 10 aug"));
        let files = Arc::new(FakeFiles::with("notes.txt", None, local(2021, 1, 1)));

        assert!(source(extractor, files).attempt(Path::new("notes.txt")).is_none());
    }

    #[test]
    fn test_extraction_failure_declines() {
        let extractor = Arc::new(FakeExtractor::default());
        let files = Arc::new(FakeFiles::with("broken.pdf", None, local(2021, 1, 1)));

        assert!(source(extractor.clone(), files)
            .attempt(Path::new("broken.pdf"))
            .is_none());
        assert_eq!(extractor.calls(), 1);
    }

    #[test]
    fn test_missing_file_skips_extraction() {
        let extractor = Arc::new(FakeExtractor::with("gone.txt", "2020-01-01"));
        let files = Arc::new(FakeFiles::default());

        assert!(source(extractor.clone(), files)
            .attempt(Path::new("gone.txt"))
            .is_none());
        assert_eq!(extractor.calls(), 0);
    }

    #[test]
    fn test_reads_real_text_file() {
        use crate::extract::DocumentParser;
        use crate::sources::OsFileSystem;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(file, "Invoice dated 2017-11-30").unwrap();

        let source = ContentDateSource::new(
            Arc::new(PatternRecognizer::new()),
            Arc::new(DocumentParser::new()),
            Arc::new(OsFileSystem),
            4,
            false,
        );
        let resolution = source.attempt(file.path()).unwrap();
        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(2017, 11, 30).unwrap());
    }
}
