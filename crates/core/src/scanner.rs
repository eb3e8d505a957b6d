//! Token Scanner: lexical extraction of inline date tokens.
//!
//! Recognizes one fixed shape: the `📅` marker glyph, optional
//! whitespace, a `YYYY-MM-DD` date, optionally followed by whitespace
//! and an `HH:mm` time. Extraction is purely lexical; `2024-13-45`
//! scans fine and is rejected later by the classifier.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// The glyph that introduces a date token in raw text.
pub const MARKER: &str = "📅";

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"📅\s*(\d{4}-\d{2}-\d{2})(?:\s*(\d{2}:\d{2}))?").unwrap()
    })
}

/// A single lexical date token found in a text buffer.
///
/// Offsets are byte offsets into the scanned string. Spans of distinct
/// tokens never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateToken<'a> {
    /// Offset of the first byte of the match (the marker glyph).
    pub start: usize,
    /// Offset one past the last byte of the match.
    pub end: usize,
    /// The raw matched text, marker included.
    pub text: &'a str,
    /// The `YYYY-MM-DD` portion.
    pub date: &'a str,
    /// The `HH:mm` portion, when present.
    pub time: Option<&'a str>,
}

impl DateToken<'_> {
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The date (and time, when present) joined with a single space.
    /// Used for pill tooltips.
    #[must_use]
    pub fn source(&self) -> String {
        match self.time {
            Some(time) => format!("{} {}", self.date, time),
            None => self.date.to_string(),
        }
    }
}

/// Scan `text` for date tokens.
///
/// The returned iterator is lazy and yields tokens left to right,
/// non-overlapping. Text without the marker glyph yields nothing; a
/// marker with no following date shape yields nothing.
pub fn scan(text: &str) -> impl Iterator<Item = DateToken<'_>> {
    token_pattern().captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let date = caps.get(1)?;
        Some(DateToken {
            start: whole.start(),
            end: whole.end(),
            text: whole.as_str(),
            date: date.as_str(),
            time: caps.get(2).map(|g| g.as_str()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_marker_yields_nothing() {
        assert_eq!(scan("plain text 2024-06-10").count(), 0);
        assert_eq!(scan("").count(), 0);
    }

    #[test]
    fn marker_without_date_yields_nothing() {
        assert_eq!(scan("📅 soon").count(), 0);
        assert_eq!(scan("📅 2024-06").count(), 0);
    }

    #[test]
    fn date_only_token() {
        let tokens: Vec<_> = scan("due 📅 2024-06-10 maybe").collect();
        assert_eq!(tokens.len(), 1);
        let token = tokens[0];
        assert_eq!(token.date, "2024-06-10");
        assert_eq!(token.time, None);
        assert_eq!(token.text, "📅 2024-06-10");
        assert_eq!(token.source(), "2024-06-10");
    }

    #[test]
    fn date_and_time_token() {
        let token = scan("📅 2024-06-10 14:30").next().unwrap();
        assert_eq!(token.date, "2024-06-10");
        assert_eq!(token.time, Some("14:30"));
        assert_eq!(token.source(), "2024-06-10 14:30");
    }

    #[test]
    fn byte_offsets_cover_the_raw_match() {
        let text = "abc 📅 2024-06-10 tail";
        let token = scan(text).next().unwrap();
        assert_eq!(&text[token.span()], token.text);
        assert_eq!(token.start, 4);
        // marker (4 bytes) + space + 10-char date
        assert_eq!(token.end, 4 + MARKER.len() + 1 + 10);
    }

    #[test]
    fn marker_abutting_date_matches() {
        let token = scan("📅2024-06-10").next().unwrap();
        assert_eq!(token.date, "2024-06-10");
    }

    #[test]
    fn multiple_tokens_in_order_without_overlap() {
        let text = "📅 2024-06-10 and 📅 2024-07-01 09:15 end";
        let tokens: Vec<_> = scan(text).collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].end <= tokens[1].start);
        assert_eq!(tokens[0].date, "2024-06-10");
        assert_eq!(tokens[1].time, Some("09:15"));
    }

    #[test]
    fn lexically_invalid_date_still_scans() {
        // Semantic validation is the classifier's job.
        let token = scan("📅 2024-13-45").next().unwrap();
        assert_eq!(token.date, "2024-13-45");
    }

    #[test]
    fn scan_is_restartable() {
        let text = "📅 2024-06-10";
        assert_eq!(scan(text).count(), 1);
        assert_eq!(scan(text).count(), 1);
    }
}
