//! Fuzzy filtering of a directory listing.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::tree::Entry;

/// An entry paired with its fuzzy match score and the byte indices in the
/// leaf name that matched the query.
#[derive(Debug, Clone)]
pub struct FuzzyMatch<'a> {
    entry: &'a Entry,
    index: usize,
    score: i64,
    matched_indices: Vec<usize>,
}

impl<'a> FuzzyMatch<'a> {
    #[must_use]
    pub fn entry(&self) -> &'a Entry {
        self.entry
    }

    /// Position of the entry in the slice given to [`fuzzy_filter`].
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Match score, higher is better. `0` when the query was empty.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn matched_indices(&self) -> &[usize] {
        &self.matched_indices
    }
}

/// Fuzzy-matches `query` against each entry's leaf name.
///
/// Returns the matches sorted by score, highest first; ties keep listing
/// order. An empty query matches every entry with a score of `0`.
pub fn fuzzy_filter<'a>(entries: &'a [Entry], query: &str) -> Vec<FuzzyMatch<'a>> {
    if query.is_empty() {
        return entries
            .iter()
            .enumerate()
            .map(|(index, entry)| FuzzyMatch {
                entry,
                index,
                score: 0,
                matched_indices: Vec::new(),
            })
            .collect();
    }

    let matcher = SkimMatcherV2::default();

    let mut matches: Vec<FuzzyMatch<'a>> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            matcher
                .fuzzy_indices(entry.name(), query)
                .map(|(score, matched_indices)| FuzzyMatch {
                    entry,
                    index,
                    score,
                    matched_indices,
                })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
