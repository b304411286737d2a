//! Search tool implementation
//!
//! Implements the `search` command: load the catalog, rank it against the
//! query and render the results.

use crate::catalog::Entity;
use crate::cli::{OutputFormat, SearchArgs};
use crate::config::Config;
use crate::error::AppError;
use crate::search::{QueryParser, ScoredMatch};
use serde::Serialize;
use tracing::debug;

/// JSON shape of one result
#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    #[serde(flatten)]
    pub entity: &'a Entity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Wrap every occurrence of a query token in `**bold**`
///
/// Overlapping and adjacent ranges merge into one.
pub fn highlight(text: &str, query: &str) -> String {
    // Lowercase one char at a time, remembering which source char each
    // lowered byte came from, so every range maps back onto char boundaries
    let mut lower = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let end = start + c.len_utf8();
        for lc in c.to_lowercase() {
            lower.push(lc);
            origin.extend(std::iter::repeat((start, end)).take(lc.len_utf8()));
        }
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for term in QueryParser::tokenize(&QueryParser::normalize(query)) {
        let mut idx = 0usize;
        while let Some(pos) = lower[idx..].find(&term) {
            let abs = idx + pos;
            let last = abs + term.len() - 1;
            ranges.push((origin[abs].0, origin[last].1));
            idx = abs + term.len();
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        if let Some(last) = merged.last_mut() {
            if s <= last.1 {
                if e > last.1 {
                    last.1 = e;
                }
                continue;
            }
        }
        merged.push((s, e));
    }

    let mut res = String::new();
    let mut last_idx = 0usize;
    for (s, e) in merged {
        if last_idx < s {
            res.push_str(&text[last_idx..s]);
        }
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    if last_idx < text.len() {
        res.push_str(&text[last_idx..]);
    }

    res
}

/// Format search results into markdown
pub fn format_search_results(matches: &[ScoredMatch<'_>], query: &str, show_scores: bool) -> String {
    let mut md = String::new();
    md.push_str(&format!(
        "# Search Results · {} components for \"{}\"\n\n",
        matches.len(),
        query.trim()
    ));

    if matches.is_empty() {
        md.push_str("No matching components.\n");
        return md;
    }

    for (rank, m) in matches.iter().enumerate() {
        md.push_str(&format!(
            "{}. {} · `{}` · {}",
            rank + 1,
            highlight(&m.entity.name, query),
            m.entity.id,
            m.entity.kind
        ));
        if show_scores {
            md.push_str(&format!(" · score {:.1}", m.score.final_score));
        }
        md.push('\n');
    }

    md
}

/// Format search results as a JSON array
pub fn format_search_json(matches: &[ScoredMatch<'_>], show_scores: bool) -> Result<String, AppError> {
    let hits: Vec<SearchHit<'_>> = matches
        .iter()
        .map(|m| SearchHit {
            entity: m.entity,
            score: show_scores.then_some(m.score.final_score),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&hits)?)
}

/// Shared implementation for the search command
pub fn execute_search(args: SearchArgs) -> Result<String, AppError> {
    let config = Config::resolve(&args.catalog, args.limit)?;
    let index = config.load_index()?;

    debug!("Search request: query='{}', limit={}", args.query, config.limit);

    let matches = index.search_scored(&args.query, config.limit);

    match args.format {
        OutputFormat::Markdown => Ok(format_search_results(&matches, &args.query, args.scores)),
        OutputFormat::Json => format_search_json(&matches, args.scores),
    }
}
