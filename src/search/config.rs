//! # Search Configuration Module
//!
//! Scoring weights, length floors and the loose-match character allow-list
//! used by the fuzzy operation search.
//!
//! The weights are empirical. Changing them changes ranking order for every
//! caller, so treat them as part of the search's observable behavior.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Context, bail};

/// Haystacks shorter than this are scored as if they had this length
pub const MIN_HAYSTACK_LEN: usize = 4;

/// Multiplier applied to a successful loose containment
pub const LOOSE_SCORE_MULTIPLIER: f64 = 1.5;

/// Number of matches rendered for a free-text documentation query
pub const DEFAULT_RENDERED_MATCHES: usize = 3;

/// Default limit for search results returned by the search tool
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Maximum allowed limit for search results
pub const MAX_SEARCH_LIMIT: usize = 500;

/// Hangul syllables block, permitted by the default loose-match charset
pub const HANGUL_SYLLABLES: RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';

/// Textual form of [`LooseCharset::default`], as accepted by its `FromStr`
pub const DEFAULT_LOOSE_CHARSET: &str = "U+AC00-U+D7A3";

/// Raw and loose weights for one searchable field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub raw: f64,
    pub loose: f64,
}

impl FieldWeights {
    pub const fn new(raw: f64, loose: f64) -> Self {
        Self { raw, loose }
    }
}

/// Per-field weights applied by [`crate::search::FuzzySearcher`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub summary: FieldWeights,
    pub path: FieldWeights,
    pub tags: FieldWeights,
    pub operation_id: FieldWeights,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            summary: FieldWeights::new(2.5, 3.0),
            path: FieldWeights::new(1.2, 1.8),
            tags: FieldWeights::new(0.8, 1.2),
            operation_id: FieldWeights::new(1.5, 2.0),
        }
    }
}

/// Characters kept by loose normalization.
///
/// ASCII digits, lower-case ASCII letters, `_`, `/`, `.` and `-` are always
/// kept. Additional scripts are enabled through inclusive char ranges so
/// mixed-language summaries can be matched without hardcoding one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LooseCharset {
    extra_ranges: Vec<RangeInclusive<char>>,
}

impl LooseCharset {
    /// Only the fixed ASCII set
    pub fn ascii_only() -> Self {
        Self {
            extra_ranges: Vec::new(),
        }
    }

    /// Also keep characters in `range`
    pub fn with_range(mut self, range: RangeInclusive<char>) -> Self {
        self.extra_ranges.push(range);
        self
    }

    /// Whether `c` survives loose normalization (after case folding)
    pub fn allows(&self, c: char) -> bool {
        matches!(c, '0'..='9' | 'a'..='z' | '_' | '/' | '.' | '-')
            || self.extra_ranges.iter().any(|range| range.contains(&c))
    }
}

impl Default for LooseCharset {
    fn default() -> Self {
        Self::ascii_only().with_range(HANGUL_SYLLABLES)
    }
}

/// Parses `none` (fixed ASCII set only) or a comma-separated list of code
/// points and ranges such as `U+AC00-U+D7A3,U+3040-U+309F`.
impl FromStr for LooseCharset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut charset = Self::ascii_only();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(charset);
        }

        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (start, end) = match item.split_once('-') {
                Some((start, end)) => (parse_code_point(start)?, parse_code_point(end)?),
                None => {
                    let c = parse_code_point(item)?;
                    (c, c)
                }
            };
            if start > end {
                bail!("Empty character range: {item}");
            }
            charset = charset.with_range(start..=end);
        }
        Ok(charset)
    }
}

impl fmt::Display for LooseCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extra_ranges.is_empty() {
            return f.write_str("none");
        }
        for (i, range) in self.extra_ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(
                f,
                "U+{:04X}-U+{:04X}",
                u32::from(*range.start()),
                u32::from(*range.end())
            )?;
        }
        Ok(())
    }
}

fn parse_code_point(text: &str) -> anyhow::Result<char> {
    let text = text.trim();
    let hex = text
        .strip_prefix("U+")
        .or_else(|| text.strip_prefix("u+"))
        .unwrap_or(text);
    let value = u32::from_str_radix(hex, 16)
        .with_context(|| format!("Invalid code point: {text:?}"))?;
    char::from_u32(value).with_context(|| format!("Not a Unicode scalar value: {text:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_charset_keeps_ascii_and_hangul() {
        let charset = LooseCharset::default();
        for c in ['a', 'z', '0', '9', '_', '/', '.', '-', '회', '가', '힣'] {
            assert!(charset.allows(c), "{c:?} should be allowed");
        }
        for c in ['A', ' ', '!', '{', 'é', 'あ', '\\'] {
            assert!(!charset.allows(c), "{c:?} should be stripped");
        }
    }

    #[test]
    fn extra_ranges_extend_the_charset() {
        let charset = LooseCharset::ascii_only().with_range('\u{3040}'..='\u{309F}');
        assert!(charset.allows('あ'));
        assert!(!charset.allows('회'));
    }

    #[test]
    fn charset_parses_ranges_and_single_code_points() {
        let charset: LooseCharset = "U+3040-U+309F, u+00e9".parse().unwrap();
        assert!(charset.allows('あ'));
        assert!(charset.allows('é'));
        assert!(!charset.allows('회'));
        assert_eq!(charset.to_string(), "U+3040-U+309F,U+00E9-U+00E9");

        assert_eq!(
            DEFAULT_LOOSE_CHARSET.parse::<LooseCharset>().unwrap(),
            LooseCharset::default()
        );
        assert_eq!(LooseCharset::default().to_string(), DEFAULT_LOOSE_CHARSET);
    }

    #[test]
    fn charset_none_keeps_only_ascii() {
        for text in ["none", "NONE", ""] {
            let charset: LooseCharset = text.parse().unwrap();
            assert_eq!(charset, LooseCharset::ascii_only());
            assert_eq!(charset.to_string(), "none");
        }
    }

    #[test]
    fn charset_rejects_malformed_ranges() {
        assert!("U+D7A3-U+AC00".parse::<LooseCharset>().is_err());
        assert!("U+XYZ".parse::<LooseCharset>().is_err());
        assert!("U+D800".parse::<LooseCharset>().is_err());
        assert!("U+AC00-".parse::<LooseCharset>().is_err());
    }

    #[test]
    fn default_weights_match_ranking_constants() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.summary, FieldWeights::new(2.5, 3.0));
        assert_eq!(weights.path, FieldWeights::new(1.2, 1.8));
        assert_eq!(weights.tags, FieldWeights::new(0.8, 1.2));
        assert_eq!(weights.operation_id, FieldWeights::new(1.5, 2.0));
    }
}
