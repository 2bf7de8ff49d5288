//! Suggestions for undefined calls
//!
//! Each undefined key is compared with every declared key and the closest
//! one is reported together with its similarity score. Scoring is a build
//! capability: without the `fuzzy` feature there is no scorer and the whole
//! step reports [`SuggestError::MatcherUnavailable`] instead of running.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::SuggestError;
use crate::model::CanonicalKey;

/// Default acceptance threshold
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Similarity of two strings on a 0-100 scale
pub type ScoreFn = fn(&str, &str) -> u8;

/// Whether approximate matching can be performed
#[derive(Debug, Clone, Copy)]
pub enum FuzzyMatcher {
    Available(ScoreFn),
    Unavailable,
}

impl FuzzyMatcher {
    /// The matcher this build was compiled with
    pub fn detect() -> Self {
        #[cfg(feature = "fuzzy")]
        {
            FuzzyMatcher::Available(levenshtein_score)
        }
        #[cfg(not(feature = "fuzzy"))]
        {
            FuzzyMatcher::Unavailable
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FuzzyMatcher::Available(_))
    }
}

/// Normalized Levenshtein similarity scaled to 0-100
#[cfg(feature = "fuzzy")]
pub fn levenshtein_score(a: &str, b: &str) -> u8 {
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub undefined_key: CanonicalKey,
    pub best_match: CanonicalKey,
    pub score: u8,
    pub accepted: bool,
}

/// Per-key result; a key with nothing to compare against is an error entry
pub type SuggestionResult = Result<Suggestion, SuggestError>;

/// Find the closest declared key for every undefined key.
///
/// Ties go to the lexicographically smallest declared key. Suggestions below
/// `threshold` are still returned, with `accepted` set to false.
pub fn suggest(
    undefined_keys: &BTreeSet<CanonicalKey>,
    declared_keys: &BTreeSet<CanonicalKey>,
    threshold: u8,
    matcher: &FuzzyMatcher,
) -> Result<Vec<SuggestionResult>, SuggestError> {
    let FuzzyMatcher::Available(score_fn) = matcher else {
        return Err(SuggestError::MatcherUnavailable);
    };

    let results = undefined_keys
        .iter()
        .map(|undefined_key| best_match(undefined_key, declared_keys, threshold, *score_fn))
        .collect();

    Ok(results)
}

fn best_match(
    undefined_key: &CanonicalKey,
    declared_keys: &BTreeSet<CanonicalKey>,
    threshold: u8,
    score_fn: ScoreFn,
) -> SuggestionResult {
    let mut best: Option<(&CanonicalKey, u8)> = None;

    // BTreeSet iterates in ascending order, so only a strictly better score
    // replaces the current best
    for candidate in declared_keys {
        let score = score_fn(undefined_key.as_str(), candidate.as_str());
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    let (best_match, score) = best.ok_or_else(|| SuggestError::EmptyCandidateSet {
        undefined_key: undefined_key.clone(),
    })?;

    Ok(Suggestion {
        undefined_key: undefined_key.clone(),
        best_match: best_match.clone(),
        score,
        accepted: score >= threshold,
    })
}
