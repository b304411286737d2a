//! Ranking & Scoring System
//!
//! Scores one catalog entity against a parsed query on a 0-100 scale:
//! exact, prefix and substring matches on the whole query first, then a
//! token-by-token fuzzy fallback averaged over the query tokens.

use super::fuzzy::FuzzyMatcher;
use super::parser::{ParsedQuery, QueryParser};
use crate::catalog::Entity;

/// Scores for whole-query matches and the token acceptance threshold
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    /// Name or id equals the query
    pub exact: f64,
    /// Name or id starts with the query
    pub prefix: f64,
    /// Name or id contains the query
    pub substring: f64,
    /// Fraction of query tokens that must match for a token-level hit
    pub min_match_ratio: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact: 100.0,
            prefix: 90.0,
            substring: 80.0,
            min_match_ratio: 0.5,
        }
    }
}

/// Which rule produced the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    Exact,
    Prefix,
    Substring,
    Token,
}

/// Normalized searchable fields of one entity, computed once per catalog
#[derive(Debug, Clone)]
pub struct SearchTarget {
    pub name: String,
    pub id: String,
    /// Tokens of name, then id, then the type tag
    pub tokens: Vec<String>,
}

impl SearchTarget {
    pub fn from_entity(entity: &Entity) -> Self {
        let name = QueryParser::normalize(&entity.name);
        let id = QueryParser::normalize(&entity.id);

        let mut tokens = QueryParser::tokenize(&name);
        tokens.extend(QueryParser::tokenize(&id));
        tokens.push(entity.kind.as_str().to_string());

        Self { name, id, tokens }
    }
}

/// Complete match score for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    /// Final score in (0, 100]
    pub final_score: f64,
    pub match_type: MatchType,
    /// Query tokens that matched something (token rule only)
    pub matched_tokens: usize,
    /// Query token count (token rule only)
    pub total_tokens: usize,
}

impl MatchScore {
    fn whole_query(final_score: f64, match_type: MatchType) -> Self {
        Self {
            final_score,
            match_type,
            matched_tokens: 0,
            total_tokens: 0,
        }
    }

    /// Score `target` against `query`
    ///
    /// Returns None when the entity should not appear in results, i.e. the
    /// score would be zero.
    pub fn calculate(
        target: &SearchTarget,
        query: &ParsedQuery,
        matcher: &FuzzyMatcher,
        weights: &ScoringWeights,
    ) -> Option<Self> {
        let q = query.whole_query.as_str();
        if q.is_empty() {
            return None;
        }

        if target.name == q || target.id == q {
            return Some(Self::whole_query(weights.exact, MatchType::Exact));
        }
        if target.name.starts_with(q) || target.id.starts_with(q) {
            return Some(Self::whole_query(weights.prefix, MatchType::Prefix));
        }
        if target.name.contains(q) || target.id.contains(q) {
            return Some(Self::whole_query(weights.substring, MatchType::Substring));
        }

        Self::calculate_tokens(target, &query.tokens, matcher, weights)
    }

    /// Token fallback: average of best token scores over all query tokens
    fn calculate_tokens(
        target: &SearchTarget,
        query_tokens: &[String],
        matcher: &FuzzyMatcher,
        weights: &ScoringWeights,
    ) -> Option<Self> {
        if query_tokens.is_empty() {
            return None;
        }

        let mut matched_tokens = 0usize;
        let mut total_token_score = 0u32;

        for token in query_tokens {
            if let Some(best) = matcher.best_match(token, &target.tokens) {
                matched_tokens += 1;
                total_token_score += best.score;
            }
        }

        let total_tokens = query_tokens.len();
        let match_ratio = matched_tokens as f64 / total_tokens as f64;
        if match_ratio < weights.min_match_ratio {
            return None;
        }

        // Unmatched tokens still count in the denominator
        let final_score = total_token_score as f64 / total_tokens as f64;
        if final_score <= 0.0 {
            return None;
        }

        Some(Self {
            final_score,
            match_type: MatchType::Token,
            matched_tokens,
            total_tokens,
        })
    }
}
