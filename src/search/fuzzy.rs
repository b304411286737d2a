//! Token Fuzzy Matching
//!
//! Scores a single query token against the tokens of a catalog entity:
//! containment first, then Levenshtein typo tolerance for tokens of three
//! characters or more.

use super::distance::levenshtein;

/// How a query token matched its best target token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatchType {
    /// Target token contains the query token
    Contained,
    /// Within edit-distance tolerance
    Typo { distance: usize },
}

/// Best match for one query token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch {
    /// Token score, always > 0
    pub score: u32,
    pub match_type: TokenMatchType,
}

/// Token matcher with configurable scores and tolerance
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Score when the target token contains the query token
    pub contained_score: u32,
    /// Score of a zero-distance typo match, before the distance penalty
    pub typo_base: u32,
    /// Penalty per edit
    pub typo_step: u32,
    /// Shortest query token (in chars) eligible for typo matching
    pub min_typo_len: usize,
    /// Tolerance as a fraction of the query token length
    pub tolerance_ratio: f64,
    /// Lower bound on tolerance
    pub min_tolerance: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    /// Create a matcher with the default scoring constants
    pub fn new() -> Self {
        Self {
            contained_score: 70,
            typo_base: 60,
            typo_step: 10,
            min_typo_len: 3,
            tolerance_ratio: 0.4,
            min_tolerance: 2,
        }
    }

    /// Maximum edit distance accepted for a query token of `token_len` chars
    pub fn tolerance(&self, token_len: usize) -> usize {
        let proportional = (token_len as f64 * self.tolerance_ratio).floor() as usize;
        proportional.max(self.min_tolerance)
    }

    /// Score `query_token` against a single `target` token
    ///
    /// Returns None when neither containment nor typo tolerance applies.
    pub fn match_token(&self, query_token: &str, target: &str) -> Option<TokenMatch> {
        if target.contains(query_token) {
            return Some(TokenMatch {
                score: self.contained_score,
                match_type: TokenMatchType::Contained,
            });
        }

        let token_len = query_token.chars().count();
        if token_len < self.min_typo_len {
            return None;
        }

        let distance = levenshtein(query_token, target);
        if distance > self.tolerance(token_len) {
            return None;
        }

        let penalty = (distance as u32).saturating_mul(self.typo_step);
        let score = self.typo_base.saturating_sub(penalty);
        if score == 0 {
            return None;
        }

        Some(TokenMatch {
            score,
            match_type: TokenMatchType::Typo { distance },
        })
    }

    /// Best match of `query_token` across all `targets`
    ///
    /// Ties keep the earliest target token.
    pub fn best_match<S: AsRef<str>>(&self, query_token: &str, targets: &[S]) -> Option<TokenMatch> {
        let mut best: Option<TokenMatch> = None;

        for target in targets {
            if let Some(candidate) = self.match_token(query_token, target.as_ref()) {
                best = Some(match best {
                    Some(existing) if existing.score >= candidate.score => existing,
                    _ => candidate,
                });
            }
        }

        best
    }
}
