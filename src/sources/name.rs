//! NAME_DATE: a date written into the file name itself.

use super::{DateSource, Resolution, Strategy};
use crate::dates::{find_dates, DateRecognizer};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Characters dropped on either side of an excised date
const CUT_PADDING: &[char] = &[' ', '\t', '_', '-'];

pub struct NameDateSource {
    recognizer: Arc<dyn DateRecognizer>,
    day_first: bool,
}

impl NameDateSource {
    pub fn new(recognizer: Arc<dyn DateRecognizer>, day_first: bool) -> Self {
        Self {
            recognizer,
            day_first,
        }
    }
}

impl DateSource for NameDateSource {
    fn strategy(&self) -> Strategy {
        Strategy::NameDate
    }

    fn attempt(&self, path: &Path) -> Option<Resolution> {
        let stem = path.file_stem()?.to_string_lossy();

        // Leftmost match wins
        let first = find_dates(self.recognizer.as_ref(), &stem, false, self.day_first, Some(1))
            .into_iter()
            .next()?;

        let remainder = excise(&stem, first.span.clone());
        let file_name = match path.extension() {
            Some(ext) => format!("{}.{}", remainder, ext.to_string_lossy()),
            None => remainder,
        };
        let renamed = match path.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        };

        tracing::debug!(
            "[NameDate] {:?} -> {} (remaining name {:?})",
            first.source,
            first.value.date,
            renamed
        );

        Some(Resolution {
            strategy: Strategy::NameDate,
            date: first.value,
            renamed: Some(renamed),
        })
    }
}

/// Remove `span` from `name`, tidying the delimiters around the cut.
///
/// Two word characters meeting at the cut are kept apart by a single space.
fn excise(name: &str, span: Range<usize>) -> String {
    let head = name[..span.start].trim_end_matches(CUT_PADDING);
    let tail = name[span.end..].trim_start_matches(CUT_PADDING);

    let joins_words = head.chars().next_back().is_some_and(char::is_alphanumeric)
        && tail.chars().next().is_some_and(char::is_alphanumeric);

    if joins_words {
        format!("{} {}", head, tail)
    } else {
        format!("{}{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::PatternRecognizer;
    use chrono::NaiveDate;

    fn source() -> NameDateSource {
        NameDateSource::new(Arc::new(PatternRecognizer::new()), false)
    }

    #[test]
    fn test_leading_date_is_removed() {
        let resolution = source()
            .attempt(Path::new("10 aug 1977 some file name.txt"))
            .unwrap();

        assert_eq!(resolution.strategy, Strategy::NameDate);
        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(1977, 8, 10).unwrap());
        assert_eq!(resolution.renamed, Some(PathBuf::from("some file name.txt")));
    }

    #[test]
    fn test_inner_date_keeps_punctuation_joined() {
        let resolution = source()
            .attempt(Path::new("Reply 10 10 18.vie version 1.docx"))
            .unwrap();

        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(2018, 10, 10).unwrap());
        assert_eq!(resolution.renamed, Some(PathBuf::from("Reply.vie version 1.docx")));
    }

    #[test]
    fn test_directory_is_preserved() {
        let resolution = source()
            .attempt(Path::new("/archive/2019 scans/report_2019-03-04_final.pdf"))
            .unwrap();

        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(2019, 3, 4).unwrap());
        assert_eq!(
            resolution.renamed,
            Some(PathBuf::from("/archive/2019 scans/report final.pdf"))
        );
    }

    #[test]
    fn test_first_of_several_dates_wins() {
        let resolution = source()
            .attempt(Path::new("2001-02-03 copy of 2004-05-06.txt"))
            .unwrap();

        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(2001, 2, 3).unwrap());
        assert_eq!(resolution.renamed, Some(PathBuf::from("copy of 2004-05-06.txt")));
    }

    #[test]
    fn test_declines_without_date() {
        assert!(source().attempt(Path::new("holiday photos.jpg")).is_none());
        // Partial dates only resolve against the sentinel year and are dropped
        assert!(source().attempt(Path::new("party 10 aug.jpg")).is_none());
    }

    #[test]
    fn test_partial_fragment_does_not_hide_full_date() {
        let resolution = source()
            .attempt(Path::new("notes 12 March 15, 2021.txt"))
            .unwrap();
        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(2021, 3, 15).unwrap());
        assert_eq!(resolution.renamed, Some(PathBuf::from("notes 12.txt")));

        let resolution = source().attempt(Path::new("due 5 aug 10 1977 x.txt")).unwrap();
        assert_eq!(resolution.date.date, NaiveDate::from_ymd_opt(1977, 8, 10).unwrap());
        assert_eq!(resolution.renamed, Some(PathBuf::from("due 5 x.txt")));
    }

    #[test]
    fn test_excise() {
        assert_eq!(excise("a 2019 b", 2..6), "a b");
        assert_eq!(excise("a-2019.b", 2..6), "a.b");
        assert_eq!(excise("2019", 0..4), "");
    }
}
