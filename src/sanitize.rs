//! Filename sanitizer
//!
//! One delimiter policy per name: if the name already uses dashes, spaces
//! become underscores, otherwise spaces become dashes. Quotes and commas are
//! then stripped.

/// Characters removed after the delimiter rewrite, in order
const STRIPPED: &[(char, &str)] = &[('\'', ""), ('"', ""), (',', "")];

/// Pick the replacement for spaces, decided once for the whole name
pub fn space_delimiter(name: &str) -> char {
    if name.contains('-') {
        '_'
    } else {
        '-'
    }
}

/// Apply the delimiter policy and strip the denylisted punctuation
pub fn sanitize_name(name: &str) -> String {
    let delimiter = space_delimiter(name);
    let mut sanitized: String = name
        .chars()
        .map(|c| if c == ' ' { delimiter } else { c })
        .collect();

    for (from, to) in STRIPPED {
        sanitized = sanitized.replace(*from, to);
    }
    sanitized
}
