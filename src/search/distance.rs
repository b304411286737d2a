//! Edit Distance
//!
//! Classic dynamic-programming Levenshtein distance over Unicode scalar values.

/// Levenshtein distance between `a` and `b`
///
/// Counts the minimum number of single-character insertions, deletions and
/// substitutions turning one string into the other. Characters are compared
/// as `char`s, so multi-byte letters count once.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // table[i][j]: distance between b[..i] and a[..j]
    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a.len() {
        table[0][j] = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            let substitution = if a[j - 1] == b[i - 1] { 0 } else { 1 };

            table[i][j] = (table[i - 1][j] + 1) // deletion
                .min(table[i][j - 1] + 1) // insertion
                .min(table[i - 1][j - 1] + substitution);
        }
    }

    table[b.len()][a.len()]
}
