//! Query-expansion suggestions.
//!
//! Pure and deterministic: a small fixed set of qualifier expansions is
//! applied to the trimmed query. No I/O, never fails.

/// Maximum number of suggestions returned.
const MAX_SUGGESTIONS: usize = 5;

/// Derive query-expansion strings for a raw query.
///
/// Non-empty (after trimming) input always yields at least one suggestion;
/// empty input yields an empty list.
pub fn suggestions(query: &str) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut expanded = vec![
        format!("{query} hd"),
        format!("{query} compilation"),
        format!("{query} amateur"),
        format!("{query} pov"),
        format!("best {query}"),
    ];
    expanded.truncate(MAX_SUGGESTIONS);
    expanded
}
