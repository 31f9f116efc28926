//! Core types for search requests, normalized records, and responses.

use serde::{Deserialize, Serialize};

use crate::source::Source;

/// Sentinel selection value meaning "all currently enabled sources".
pub const ALL_SOURCES: &str = "all";

/// Whether a record is a regular video or an animated GIF listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A regular video listing.
    Video,
    /// An animated GIF listing.
    Gif,
}

/// A single normalized record produced by a source driver.
///
/// Immutable once produced; drivers construct records and nothing mutates
/// them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Source-scoped identifier, unique within one source.
    pub id: String,
    /// The listing title.
    pub title: String,
    /// Canonical absolute URL of the watch page.
    pub url: String,
    /// Absolute thumbnail URL, when the listing carries one.
    pub thumbnail: Option<String>,
    /// Duration normalized to `m:ss` or `h:mm:ss`, when present.
    pub duration: Option<String>,
    /// View count as a display string, when present.
    pub views: Option<String>,
    /// Slug of the source that produced this record.
    pub source: String,
    /// Record kind.
    pub kind: RecordKind,
}

/// An incoming search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query. Must be non-empty after trimming.
    pub query: String,
    /// Source selection: explicit slugs, or the `"all"` sentinel.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    /// 1-origin result page. Drivers translate to each site's native origin.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Upper bound on returned records.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_sources() -> Vec<String> {
    vec![ALL_SOURCES.to_string()]
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> usize {
    20
}

/// The aggregated outcome of one search request.
///
/// `sources_searched` lists only sources that were enabled, selected, and
/// answered successfully — a source that errored is omitted, so callers can
/// distinguish "no matches" (non-empty list, empty results) from "every
/// source is broken" (empty list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Merged records in source-registration order, truncated to the limit.
    pub results: Vec<VideoRecord>,
    /// Record count before truncation.
    pub total: usize,
    /// Echo of the requested page.
    pub page: u32,
    /// Slugs of sources that contributed, in registration order.
    pub sources_searched: Vec<String>,
}

/// Normalized identity of a cacheable search request.
///
/// Two requests that resolve to the same key are cache-equivalent
/// regardless of how the source selection was spelled: `["all"]` resolves
/// to the sorted list of currently-enabled slugs at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    query: String,
    sources: Vec<String>,
    page: u32,
}

impl SearchKey {
    /// Build a key from a query, the resolved source set, and a page.
    ///
    /// The query is trimmed and lowercased; the slugs are sorted so the
    /// key is independent of resolution order.
    pub fn new(query: &str, sources: &[Source], page: u32) -> Self {
        let mut slugs: Vec<String> = sources.iter().map(|s| s.slug().to_string()).collect();
        slugs.sort_unstable();
        Self {
            query: query.trim().to_lowercase(),
            sources: slugs,
            page,
        }
    }
}
