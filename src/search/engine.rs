//! Search Engine Integration
//!
//! Ties together query parsing, token matching and ranking over an
//! immutable catalog.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::fuzzy::FuzzyMatcher;
use super::parser::QueryParser;
use super::ranking::{MatchScore, ScoringWeights, SearchTarget};
use crate::catalog::{CatalogError, Entity};

/// Result cap used by `search`
pub const DEFAULT_LIMIT: usize = 8;

/// Distinct queries a `SearchSession` remembers before starting over
pub const MAX_CACHED_QUERIES: usize = 256;

/// An entity paired with its score
#[derive(Debug, Clone)]
pub struct ScoredMatch<'a> {
    pub entity: &'a Entity,
    pub score: MatchScore,
}

/// Read-only search index over a catalog
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entities: Vec<Entity>,
    targets: Vec<SearchTarget>,
    fuzzy_matcher: FuzzyMatcher,
    scoring_weights: ScoringWeights,
}

impl SearchIndex {
    /// Build an index with default scoring
    ///
    /// Fails on duplicate ids or blank id/name fields.
    pub fn build(entities: Vec<Entity>) -> Result<Self, CatalogError> {
        Self::with_weights(entities, FuzzyMatcher::new(), ScoringWeights::default())
    }

    /// Build an index with custom token matching and weights
    pub fn with_weights(
        entities: Vec<Entity>,
        fuzzy_matcher: FuzzyMatcher,
        scoring_weights: ScoringWeights,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            entity.validate()?;
            if !seen.insert(entity.id.as_str()) {
                return Err(CatalogError::DuplicateId(entity.id.clone()));
            }
        }

        let targets = entities.iter().map(SearchTarget::from_entity).collect();
        debug!("Built search index over {} entities", entities.len());

        Ok(Self {
            entities,
            targets,
            fuzzy_matcher,
            scoring_weights,
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Catalog in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Look up an entity by exact id
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Search with the default result cap
    pub fn search(&self, query: &str) -> Vec<&Entity> {
        self.search_with_limit(query, DEFAULT_LIMIT)
    }

    /// Best matches for `query`, at most `limit`, highest score first
    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<&Entity> {
        self.ranked_positions(query, limit)
            .into_iter()
            .map(|(pos, _)| &self.entities[pos])
            .collect()
    }

    /// Like `search_with_limit`, keeping the scores
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<ScoredMatch<'_>> {
        self.ranked_positions(query, limit)
            .into_iter()
            .map(|(pos, score)| ScoredMatch {
                entity: &self.entities[pos],
                score,
            })
            .collect()
    }

    /// Catalog positions of the ranked results
    fn ranked_positions(&self, query: &str, limit: usize) -> Vec<(usize, MatchScore)> {
        let parsed = QueryParser::parse(query);
        if parsed.is_blank() || limit == 0 {
            return Vec::new();
        }

        let mut results: Vec<(usize, MatchScore)> = self
            .targets
            .iter()
            .enumerate()
            .filter_map(|(pos, target)| {
                MatchScore::calculate(target, &parsed, &self.fuzzy_matcher, &self.scoring_weights)
                    .map(|score| (pos, score))
            })
            .collect();

        // Stable: equal scores keep catalog order
        results.sort_by(|a, b| {
            b.1.final_score
                .partial_cmp(&a.1.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            "Query '{}' matched {} of {} entities",
            parsed.whole_query,
            results.len(),
            self.entities.len()
        );

        results.truncate(limit);
        results
    }
}

/// Index plus a per-query memo, for keystroke-driven callers
///
/// The catalog never changes under a session, so cached rankings stay valid.
/// The memo holds at most `max_cached` queries and is cleared when full.
pub struct SearchSession<'a> {
    index: &'a SearchIndex,
    limit: usize,
    max_cached: usize,
    cache: HashMap<String, Vec<usize>>,
}

impl<'a> SearchSession<'a> {
    pub fn new(index: &'a SearchIndex, limit: usize) -> Self {
        Self::with_cache_limit(index, limit, MAX_CACHED_QUERIES)
    }

    pub fn with_cache_limit(index: &'a SearchIndex, limit: usize, max_cached: usize) -> Self {
        Self {
            index,
            limit,
            max_cached: max_cached.max(1),
            cache: HashMap::new(),
        }
    }

    pub fn search(&mut self, query: &str) -> Vec<&'a Entity> {
        let index = self.index;
        let limit = self.limit;

        if self.cache.len() >= self.max_cached && !self.cache.contains_key(query) {
            debug!("Session cache full ({} queries), clearing", self.cache.len());
            self.cache.clear();
        }

        let positions = self.cache.entry(query.to_string()).or_insert_with(|| {
            index
                .ranked_positions(query, limit)
                .into_iter()
                .map(|(pos, _)| pos)
                .collect()
        });

        positions.iter().map(|&pos| &index.entities[pos]).collect()
    }

    /// Number of distinct queries answered so far
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{substation_catalog, EntityType};

    fn ids<'a>(results: &[&'a Entity]) -> Vec<&'a str> {
        results.iter().map(|e| e.id.as_str()).collect()
    }

    fn small_catalog() -> SearchIndex {
        SearchIndex::build(vec![
            Entity::new("T-L-1", "Left Side Transformer 1", EntityType::Transformer),
            Entity::new("CB-L-1-0", "Left Breaker 1 Ph-A", EntityType::Breaker),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_query() {
        let index = small_catalog();
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let index = SearchIndex::build(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.search("transformer").is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = SearchIndex::build(vec![
            Entity::new("T-L-1", "Left Side Transformer 1", EntityType::Transformer),
            Entity::new("T-L-1", "Another Transformer", EntityType::Transformer),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "T-L-1"));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let err = SearchIndex::build(vec![Entity::new(" ", "Nameless", EntityType::Unknown)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyField { .. }));
    }

    #[test]
    fn test_end_to_end_left_trans() {
        let index = small_catalog();
        let results = index.search_scored("Left Trans 1", DEFAULT_LIMIT);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].entity.id, "T-L-1");
        assert_eq!(results[1].entity.id, "CB-L-1-0");
        assert!(results[0].score.final_score > results[1].score.final_score);
    }

    #[test]
    fn test_exact_match_first() {
        let index = SearchIndex::build(substation_catalog()).unwrap();
        let results = index.search_scored("T-L-1", DEFAULT_LIMIT);

        assert_eq!(results[0].entity.id, "T-L-1");
        assert_eq!(results[0].score.final_score, 100.0);
        assert!(results[1..].iter().all(|m| m.score.final_score < 100.0));
    }

    #[test]
    fn test_limit_enforced() {
        let entities = (1..=50)
            .map(|i| {
                Entity::new(
                    format!("T-{}", i),
                    format!("Transformer {}", i),
                    EntityType::Transformer,
                )
            })
            .collect();
        let index = SearchIndex::build(entities).unwrap();

        assert_eq!(index.search("transformer").len(), DEFAULT_LIMIT);
        assert_eq!(index.search_with_limit("transformer", 20).len(), 20);
        assert!(index.search_with_limit("transformer", 0).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let entities = (1..=5)
            .map(|i| {
                Entity::new(
                    format!("T-{}", i),
                    format!("Transformer {}", i),
                    EntityType::Transformer,
                )
            })
            .collect();
        let index = SearchIndex::build(entities).unwrap();

        // Every name starts with the query, so all score 90
        let results = index.search("transformer");
        assert_eq!(ids(&results), vec!["T-1", "T-2", "T-3", "T-4", "T-5"]);
    }

    #[test]
    fn test_typo_tolerance() {
        let index = SearchIndex::build(substation_catalog()).unwrap();
        let results = index.search("Trnsformr");

        assert_eq!(results.len(), DEFAULT_LIMIT);
        assert!(results.iter().all(|e| e.kind == EntityType::Transformer));
    }

    #[test]
    fn test_ratio_rejection() {
        let index = small_catalog();
        assert_eq!(ids(&index.search("xyz transformer")), vec!["T-L-1"]);
        assert!(index.search("xyz abc transformer").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let index = SearchIndex::build(substation_catalog()).unwrap();
        assert_eq!(
            ids(&index.search("LEFT SIDE TRANSFORMER 1")),
            ids(&index.search("left side transformer 1"))
        );
    }

    #[test]
    fn test_separator_equivalence() {
        let index = small_catalog();
        let hyphen = index.search_scored("CB-L-1", DEFAULT_LIMIT);
        let spaced = index.search_scored("CB L 1", DEFAULT_LIMIT);

        // "cb-l-1" is an id prefix, "cb l 1" falls through to tokens
        assert_eq!(hyphen[0].entity.id, "CB-L-1-0");
        assert_eq!(spaced[0].entity.id, "CB-L-1-0");
    }

    #[test]
    fn test_get_by_id() {
        let index = small_catalog();
        assert_eq!(index.get("CB-L-1-0").map(|e| e.kind), Some(EntityType::Breaker));
        assert!(index.get("cb-l-1-0").is_none());
    }

    #[test]
    fn test_session_matches_index() {
        let index = SearchIndex::build(substation_catalog()).unwrap();
        let mut session = SearchSession::new(&index, DEFAULT_LIMIT);

        for query in ["t", "tr", "tra", "trans", "tra"] {
            assert_eq!(ids(&session.search(query)), ids(&index.search(query)));
        }
        assert_eq!(session.cached_queries(), 4);
    }

    #[test]
    fn test_session_cache_is_bounded() {
        let index = SearchIndex::build(substation_catalog()).unwrap();
        let mut session = SearchSession::with_cache_limit(&index, DEFAULT_LIMIT, 2);

        for query in ["left", "right", "left", "battery", "gantry", "trans"] {
            assert_eq!(ids(&session.search(query)), ids(&index.search(query)));
            assert!(session.cached_queries() <= 2);
        }

        // A repeated query hits the memo without evicting anything
        session.search("trans");
        assert_eq!(session.cached_queries(), 1);
        session.search("ph");
        session.search("ph");
        assert_eq!(session.cached_queries(), 2);
    }
}
