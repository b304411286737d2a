//! Component search with typo-tolerant token matching
//!
//! Whole-query rules (exact, prefix, substring) rank first; anything else
//! falls through to per-token containment and Levenshtein matching.

pub mod distance;
pub mod engine;
pub mod fuzzy;
pub mod parser;
pub mod ranking;


pub use engine::{ScoredMatch, SearchIndex, SearchSession, DEFAULT_LIMIT, MAX_CACHED_QUERIES};
pub use fuzzy::FuzzyMatcher;
pub use parser::{ParsedQuery, QueryParser};
pub use ranking::{MatchScore, MatchType, ScoringWeights};
