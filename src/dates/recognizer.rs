//! Pattern based date recognizer
//!
//! Recognized shapes:
//! - `2018-10-10`, `2018.10.10`, `2018_10_10`, with optional `T12:30[:00]` and offset
//! - `20181010`, `20181010_123000`
//! - `10 10 18`, `03/04/2019`, `3.4.19`
//! - `10 aug 1977`, `10th August, 1977`, `Aug 10 1977`, `August 10, 1977`
//! - `aug 1977`, `10 aug` (missing fields come from the base date)

use super::{DateMatch, DateRecognizer, MatchedDate, RecognizeOptions};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::cmp::Reverse;
use std::ops::Range;

/// Month names and their common abbreviations
const MONTH: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Years accepted in the separator-free `YYYYMMDD` form
const COMPACT_YEARS: Range<i32> = 1900..2100;

/// Two digit years at or above this pivot are 19xx, below are 20xx
const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PatternKind {
    Iso,
    Compact,
    Numeric,
    DayMonth,
    MonthDay,
    MonthYear,
}

struct Pattern {
    kind: PatternKind,
    regex: Regex,
}

static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    let build = |kind, pattern: String| Pattern {
        kind,
        regex: Regex::new(&format!("(?i){}", pattern)).expect("Invalid date pattern"),
    };

    vec![
        build(
            PatternKind::Iso,
            r"(\d{4})[-./_](\d{1,2})[-./_](\d{1,2})(?:[T _](\d{1,2}):(\d{2})(?::(\d{2}))?(?:\s?(Z|[+-]\d{2}:?\d{2}))?)?"
                .to_string(),
        ),
        build(
            PatternKind::Compact,
            r"(\d{4})(\d{2})(\d{2})(?:[T_-]?(\d{2})(\d{2})(\d{2}))?".to_string(),
        ),
        build(
            PatternKind::Numeric,
            r"(\d{1,2})([-./ ])(\d{1,2})([-./ ])(\d{4}|\d{2})".to_string(),
        ),
        build(
            PatternKind::DayMonth,
            format!(r"(\d{{1,2}})(?:st|nd|rd|th)?[\s_\-.,]*{month}\.?(?:,?[\s_\-.]+(\d{{4}}))?", month = MONTH),
        ),
        build(
            PatternKind::MonthDay,
            format!(r"{month}\.?[\s_\-.]*(\d{{1,2}})(?:st|nd|rd|th)?(?:,?[\s_\-.]+(\d{{4}}))?", month = MONTH),
        ),
        build(
            PatternKind::MonthYear,
            format!(r"{month}\.?,?[\s_\-.]+(\d{{4}})", month = MONTH),
        ),
    ]
});

/// A parsed candidate before overlap resolution
struct Candidate {
    value: MatchedDate,
    span: Range<usize>,
    /// At least one field was taken from the base date
    borrowed: bool,
}

/// Default [`DateRecognizer`] built from a fixed set of regular expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRecognizer;

impl PatternRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl DateRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str, options: &RecognizeOptions) -> Vec<DateMatch> {
        let mut candidates = Vec::new();

        for pattern in PATTERNS.iter() {
            let mut at = 0;
            while at < text.len() {
                let Some(caps) = pattern.regex.captures_at(text, at) else {
                    break;
                };
                let Some(whole) = caps.get(0) else {
                    break;
                };
                let span = whole.range();

                let parsed = if at_token_boundary(text, &span) {
                    parse(pattern.kind, &caps, options)
                } else {
                    None
                };

                match parsed {
                    Some((value, borrowed)) if !(options.strict && borrowed) => {
                        candidates.push(Candidate {
                            value,
                            span: span.clone(),
                            borrowed,
                        });
                        at = span.end;
                    }
                    // Retry one character later so a rejected match does not hide a neighbour
                    _ => at = next_char_boundary(text, span.start),
                }
            }
        }

        // Complete dates beat partial ones they overlap, then the earliest
        // start wins, then the longest match
        candidates.sort_by_key(|c| (c.borrowed, c.span.start, Reverse(c.span.end)));

        let mut matches: Vec<DateMatch> = Vec::new();
        for candidate in candidates {
            if matches
                .iter()
                .any(|kept| overlaps(&candidate.span, &kept.span))
            {
                continue;
            }
            tracing::trace!(
                "[PatternRecognizer] {:?} -> {} (borrowed: {})",
                &text[candidate.span.clone()],
                candidate.value.date,
                candidate.borrowed
            );
            matches.push(DateMatch {
                value: candidate.value,
                source: text[candidate.span.clone()].to_string(),
                span: candidate.span,
            });
        }

        matches.sort_by_key(|m| m.span.start);
        matches
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Parse a regex hit into a date, reporting whether the base date filled a gap
fn parse(kind: PatternKind, caps: &Captures, options: &RecognizeOptions) -> Option<(MatchedDate, bool)> {
    let base = options.base_date;

    match kind {
        PatternKind::Iso => {
            let date = ymd(int(caps, 1)?, uint(caps, 2)?, uint(caps, 3)?)?;
            let time = match caps.get(4) {
                Some(_) => Some(hms(uint(caps, 4)?, uint(caps, 5)?, uint(caps, 6).unwrap_or(0))?),
                None => None,
            };
            let offset = match caps.get(7) {
                Some(raw) => Some(parse_offset(raw.as_str())?),
                None => None,
            };
            Some((MatchedDate { date, time, offset }, false))
        }
        PatternKind::Compact => {
            let year = int(caps, 1)?;
            if !COMPACT_YEARS.contains(&year) {
                return None;
            }
            let date = ymd(year, uint(caps, 2)?, uint(caps, 3)?)?;
            let time = match caps.get(4) {
                Some(_) => Some(hms(uint(caps, 4)?, uint(caps, 5)?, uint(caps, 6)?)?),
                None => None,
            };
            Some((
                MatchedDate {
                    date,
                    time,
                    offset: None,
                },
                false,
            ))
        }
        PatternKind::Numeric => {
            // Mixed separators ("1.2 10") are version numbers, not dates
            if caps.get(2)?.as_str() != caps.get(4)?.as_str() {
                return None;
            }
            let first = uint(caps, 1)?;
            let second = uint(caps, 3)?;
            let year = expand_year(caps.get(5)?.as_str())?;

            let day_first = if options.day_first {
                !(second > 12 && first <= 12)
            } else {
                first > 12
            };
            let (month, day) = if day_first {
                (second, first)
            } else {
                (first, second)
            };
            Some((MatchedDate::from_date(ymd(year, month, day)?), false))
        }
        PatternKind::DayMonth => {
            let day = uint(caps, 1)?;
            let month = month_number(caps.get(2)?.as_str())?;
            let (year, borrowed) = match caps.get(3) {
                Some(_) => (int(caps, 3)?, false),
                None => (base.year(), true),
            };
            Some((MatchedDate::from_date(ymd(year, month, day)?), borrowed))
        }
        PatternKind::MonthDay => {
            let month = month_number(caps.get(1)?.as_str())?;
            let day = uint(caps, 2)?;
            let (year, borrowed) = match caps.get(3) {
                Some(_) => (int(caps, 3)?, false),
                None => (base.year(), true),
            };
            Some((MatchedDate::from_date(ymd(year, month, day)?), borrowed))
        }
        PatternKind::MonthYear => {
            let month = month_number(caps.get(1)?.as_str())?;
            let year = int(caps, 2)?;
            Some((MatchedDate::from_date(ymd(year, month, base.day())?), true))
        }
    }
}

/// A match starting or ending with a digit must not touch another digit,
/// and likewise for letters.
fn at_token_boundary(text: &str, span: &Range<usize>) -> bool {
    let matched = &text[span.clone()];
    let before = text[..span.start].chars().next_back();
    let after = text[span.end..].chars().next();

    !touches(before, matched.chars().next()) && !touches(matched.chars().next_back(), after)
}

fn touches(a: Option<char>, b: Option<char>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            (a.is_ascii_digit() && b.is_ascii_digit()) || (a.is_alphabetic() && b.is_alphabetic())
        }
        _ => false,
    }
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map(|c| from + c.len_utf8())
        .unwrap_or(text.len())
}

fn uint(caps: &Captures, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn int(caps: &Captures, index: usize) -> Option<i32> {
    caps.get(index)?.as_str().parse().ok()
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn hms(hour: u32, minute: u32, second: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    if raw.len() != 2 {
        return Some(year);
    }
    Some(if year >= TWO_DIGIT_YEAR_PIVOT {
        1900 + year
    } else {
        2000 + year
    })
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// `Z`, `+05:30`, `-0800`
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let sign = match raw.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = raw[1..].chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
