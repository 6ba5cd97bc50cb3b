//! Heuristic fuzzy ranking over an [`OperationIndex`].
//!
//! Each record is scored with two containment measures per field: a raw
//! case-folded substring test, and a loose test that first strips
//! whitespace and punctuation from both sides so that `"회원 가입"` still
//! finds `"회원가입"`. The weighted sum over summary, path, tags and
//! operation id is the record's score.

use crate::search::config::{
    FieldWeights, LOOSE_SCORE_MULTIPLIER, LooseCharset, MIN_HAYSTACK_LEN, ScoringWeights,
};
use crate::search::indexer::{OperationIndex, OperationRecord};

/// A record paired with its relevance score for one query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch<'a> {
    pub record: &'a OperationRecord,
    pub score: f64,
}

/// Ranks operations against free-text queries
#[derive(Debug, Clone, Default)]
pub struct FuzzySearcher {
    charset: LooseCharset,
    weights: ScoringWeights,
}

impl FuzzySearcher {
    pub fn with_charset(charset: LooseCharset) -> Self {
        Self {
            charset,
            weights: ScoringWeights::default(),
        }
    }

    /// Score every record and return those with a positive score, best first.
    ///
    /// An empty query or an empty index yields no matches.
    pub fn search<'a>(&self, index: &'a OperationIndex, query: &str) -> Vec<ScoredMatch<'a>> {
        if query.is_empty() || index.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<ScoredMatch<'a>> = index
            .iter()
            .filter_map(|record| {
                let score = self.score(record, query);
                (score > 0.0).then_some(ScoredMatch { record, score })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }

    /// Weighted relevance of `record` for `query`
    pub fn score(&self, record: &OperationRecord, query: &str) -> f64 {
        let weights = &self.weights;
        self.field_score(&record.summary, query, weights.summary)
            + self.field_score(&record.path, query, weights.path)
            + self.field_score(&record.tags, query, weights.tags)
            + self.field_score(
                record.operation_id().unwrap_or_default(),
                query,
                weights.operation_id,
            )
    }

    fn field_score(&self, field: &str, query: &str, weights: FieldWeights) -> f64 {
        contains_score(field, query) * weights.raw
            + loose_contains_score(field, query, &self.charset) * weights.loose
    }
}

/// Lower-case `text` one character at a time.
///
/// Unlike [`str::to_lowercase`] this has no context-dependent mappings, so a
/// folded substring is always a substring of the folded whole.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Fold case, drop whitespace and every character outside `charset`
pub fn normalize_for_loose_match(text: &str, charset: &LooseCharset) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace() && charset.allows(*c))
        .collect()
}

/// Case-folded containment score in `[0, 1]`
pub fn contains_score(haystack: &str, needle: &str) -> f64 {
    if haystack.is_empty() || needle.is_empty() {
        return 0.0;
    }
    length_ratio(&fold_case(haystack), &fold_case(needle))
}

/// Containment score after loose normalization, in `[0, 1.5]`
pub fn loose_contains_score(haystack: &str, needle: &str, charset: &LooseCharset) -> f64 {
    if haystack.is_empty() || needle.is_empty() {
        return 0.0;
    }
    let haystack = normalize_for_loose_match(haystack, charset);
    let needle = normalize_for_loose_match(needle, charset);
    if haystack.is_empty() || needle.is_empty() {
        return 0.0;
    }
    length_ratio(&haystack, &needle) * LOOSE_SCORE_MULTIPLIER
}

fn length_ratio(haystack: &str, needle: &str) -> f64 {
    if !haystack.contains(needle) {
        return 0.0;
    }
    let needle_len = needle.chars().count() as f64;
    let haystack_len = haystack.chars().count().max(MIN_HAYSTACK_LEN) as f64;
    (needle_len / haystack_len).min(1.0)
}
