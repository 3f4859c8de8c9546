//! Date candidate discovery
//!
//! A [`DateRecognizer`] turns free text into dated spans. [`find_dates`] wraps
//! it with the sentinel base date: any field the recognizer had to borrow
//! from the base date lands in year 3000, and those fragments are dropped.

mod recognizer;

pub use recognizer::PatternRecognizer;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use std::ops::Range;

/// Year of the sentinel base date. Never a plausible document date.
pub const SENTINEL_YEAR: i32 = 3000;

/// Reference date handed to the recognizer for filling missing fields
pub static SENTINEL_BASE_DATE: Lazy<NaiveDate> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(SENTINEL_YEAR, 1, 1).expect("sentinel base date is a valid date")
});

/// A calendar date with whatever extra precision the text carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedDate {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub offset: Option<FixedOffset>,
}

impl MatchedDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            time: None,
            offset: None,
        }
    }
}

/// One recognized date and where it sits in the scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub value: MatchedDate,
    /// Byte offsets into the scanned text
    pub span: Range<usize>,
    /// The substring the date was read from
    pub source: String,
}

/// Options passed through to the recognizer
#[derive(Debug, Clone, Copy)]
pub struct RecognizeOptions {
    /// Supplies fields missing from partial dates
    pub base_date: NaiveDate,
    /// Only report dates whose fields all came from the text
    pub strict: bool,
    /// Read ambiguous all-numeric dates as day/month/year
    pub day_first: bool,
}

/// Text to date span recognizer
///
/// Matches must be returned in order of appearance and must not overlap.
pub trait DateRecognizer: Send + Sync {
    fn recognize(&self, text: &str, options: &RecognizeOptions) -> Vec<DateMatch>;
}

/// Find real dates in `text`, in order of appearance.
///
/// Partial matches resolved against the sentinel base date are filtered out.
/// `limit` caps how many matches are kept.
pub fn find_dates(
    recognizer: &dyn DateRecognizer,
    text: &str,
    strict: bool,
    day_first: bool,
    limit: Option<usize>,
) -> Vec<DateMatch> {
    let options = RecognizeOptions {
        base_date: *SENTINEL_BASE_DATE,
        strict,
        day_first,
    };

    let matches = recognizer
        .recognize(text, &options)
        .into_iter()
        .filter(|m| {
            let partial = m.value.date.year() == SENTINEL_YEAR;
            if partial {
                tracing::debug!("[DateFinder] Dropping partial date {:?}", m.source);
            }
            !partial
        });

    match limit {
        Some(limit) => matches.take(limit).collect(),
        None => matches.collect(),
    }
}
