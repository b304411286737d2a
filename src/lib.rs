//! substation-search
//!
//! Fuzzy component search over a substation catalog: transformers, breakers,
//! generators, control buildings and gantry towers. The engine ranks a
//! read-only catalog against free-text queries with typo tolerance.
//!
//! ```no_run
//! use substation_search::catalog::substation_catalog;
//! use substation_search::search::SearchIndex;
//!
//! let index = SearchIndex::build(substation_catalog()).unwrap();
//! let hits = index.search("Trnsformr");
//! assert!(hits.iter().all(|e| e.id.starts_with("T-")));
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod tools;
