//! Query Parser & Normalizer
//!
//! Normalizes queries and catalog fields and splits them into tokens on
//! whitespace, hyphen and underscore runs.

use unicode_normalization::UnicodeNormalization;

/// Parsed and normalized search query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Original unmodified query
    pub original: String,
    /// Whole query, trimmed and lowercased, for exact/prefix/substring rules
    pub whole_query: String,
    /// Non-empty tokens of the normalized query
    pub tokens: Vec<String>,
}

impl ParsedQuery {
    /// True when the query holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.whole_query.is_empty()
    }
}

/// Query parser and normalizer
pub struct QueryParser;

impl QueryParser {
    /// Parse a search query into its normalized form and tokens
    pub fn parse(query: &str) -> ParsedQuery {
        let whole_query = Self::normalize(query)
            .trim_matches(Self::is_whitespace)
            .to_string();
        let tokens = Self::tokenize(&whole_query);

        ParsedQuery {
            original: query.to_string(),
            whole_query,
            tokens,
        }
    }

    /// Normalize text for matching
    /// - Unicode NFC normalization
    /// - lowercase
    pub fn normalize(text: &str) -> String {
        text.nfc().collect::<String>().to_lowercase()
    }

    /// Split already-normalized text into non-empty tokens
    pub fn tokenize(text: &str) -> Vec<String> {
        text.split(Self::is_separator)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Token separators: any whitespace, `-` or `_`
    pub fn is_separator(c: char) -> bool {
        Self::is_whitespace(c) || c == '-' || c == '_'
    }

    /// Whitespace as browsers define it for `\s` and `String.prototype.trim`:
    /// Unicode White_Space plus the byte order mark, minus NEL (U+0085)
    pub fn is_whitespace(c: char) -> bool {
        match c {
            '\u{FEFF}' => true,
            '\u{0085}' => false,
            _ => c.is_whitespace(),
        }
    }
}
