//! # vidsearch
//!
//! Multi-source video search aggregation engine.
//!
//! Aggregates search results for a free-text query across several
//! independent content sources, each reachable only through site-specific
//! HTML scraping — no site APIs, no API keys.
//!
//! ## Design
//!
//! - One [`driver::SourceDriver`] per source builds the site's search URL
//!   (owning its page-numbering origin) and extracts normalized
//!   [`VideoRecord`]s from listing HTML via CSS selectors
//! - [`SearchService`] fans a request out to all selected, enabled sources
//!   concurrently and merges contributions in registration order
//! - Graceful degradation: a failing source contributes nothing and never
//!   aborts the request; `sources_searched` tells callers who answered
//! - Resilient fetch layer with per-attempt timeout, exponential-backoff
//!   retry, and User-Agent rotation
//! - Bounded LRU result cache with TTL expiry keyed on the normalized
//!   (query, sources, page) identity
//! - Runtime source registry: sources can be toggled without restart
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - Search queries are logged only at trace level

pub mod cache;
pub mod config;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod fetch;
pub mod orchestrator;
pub mod registry;
pub mod server;
pub mod source;
pub mod suggest;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use fetch::{FetchClient, Fetcher};
pub use orchestrator::SearchService;
pub use registry::{SourceDescriptor, SourceRegistry};
pub use source::Source;
pub use suggest::suggestions;
pub use types::{RecordKind, SearchRequest, SearchResponse, VideoRecord, ALL_SOURCES};
