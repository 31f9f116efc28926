//! Search orchestration: concurrent multi-source fan-out and aggregation.
//!
//! One search fans out a task per resolved source, each building its URL
//! via the source's driver, fetching via the fetch layer, and extracting
//! records via the driver. Branches fail independently: a broken source
//! contributes nothing and never cancels or delays its siblings. The merged
//! result is cached under the request's normalized key.

use std::time::Duration;

use crate::cache::ResultCache;
use crate::config::SearchConfig;
use crate::driver::driver_for;
use crate::error::SearchError;
use crate::fetch::{FetchClient, Fetcher};
use crate::registry::SourceRegistry;
use crate::source::Source;
use crate::types::{SearchKey, SearchRequest, SearchResponse, VideoRecord};

/// The search aggregation engine.
///
/// Owns the source registry, the result cache, and the fetch layer. The
/// fetcher is a type parameter so tests can observe and script network
/// activity; production code uses [`FetchClient`].
pub struct SearchService<F: Fetcher = FetchClient> {
    config: SearchConfig,
    registry: SourceRegistry,
    cache: ResultCache,
    fetcher: F,
}

impl SearchService<FetchClient> {
    /// Build a service with a real HTTP fetch layer.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be constructed.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let fetcher = FetchClient::new(&config)?;
        Ok(Self::assemble(config, fetcher))
    }
}

impl<F: Fetcher> SearchService<F> {
    /// Build a service around a custom fetch implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid.
    pub fn with_fetcher(config: SearchConfig, fetcher: F) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self::assemble(config, fetcher))
    }

    fn assemble(config: SearchConfig, fetcher: F) -> Self {
        let cache = ResultCache::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_seconds),
        );
        Self {
            config,
            registry: SourceRegistry::new(),
            cache,
            fetcher,
        }
    }

    /// The source registry backing this service.
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search the selected sources for a query.
    ///
    /// # Pipeline
    ///
    /// 1. Validate the request (no I/O happens for invalid input)
    /// 2. Resolve the selection and check the cache
    /// 3. Fan out one concurrent task per resolved source
    /// 4. Join all branches; absorb per-source failures
    /// 5. Concatenate contributions in source-registration order, truncate
    ///    to the limit, record the pre-truncation total
    /// 6. Cache and return
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] for an empty query or
    /// non-positive page/limit. Per-source failures never surface: a search
    /// where every source fails succeeds with empty `results` and empty
    /// `sources_searched`.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidRequest(
                "query must not be empty".into(),
            ));
        }
        if request.page == 0 {
            return Err(SearchError::InvalidRequest("page must be at least 1".into()));
        }
        if request.limit == 0 {
            return Err(SearchError::InvalidRequest(
                "limit must be at least 1".into(),
            ));
        }

        let resolved = self.registry.resolve(&request.sources);
        let key = SearchKey::new(query, &resolved, request.page);

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(query, "cache hit");
            return Ok(hit);
        }

        // Fan out in registration order; join_all preserves input order, so
        // completion order never leaks into result order.
        let selected: Vec<Source> = Source::all()
            .iter()
            .copied()
            .filter(|source| resolved.contains(source))
            .collect();

        let branches: Vec<_> = selected
            .iter()
            .map(|&source| async move {
                let outcome = self.query_source(source, query, request.page).await;
                (source, outcome)
            })
            .collect();

        let outcomes = futures::future::join_all(branches).await;

        let mut results: Vec<VideoRecord> = Vec::new();
        let mut sources_searched: Vec<String> = Vec::new();

        for (source, outcome) in outcomes {
            match outcome {
                Ok(records) => {
                    tracing::debug!(source = %source, count = records.len(), "source answered");
                    sources_searched.push(source.slug().to_string());
                    results.extend(records);
                }
                Err(err) => {
                    tracing::warn!(source = %source, error = %err, "source query failed");
                }
            }
        }

        let total = results.len();
        results.truncate(request.limit);

        let response = SearchResponse {
            results,
            total,
            page: request.page,
            sources_searched,
        };

        self.cache.put(key, response.clone());
        tracing::debug!(
            query,
            total,
            sources = response.sources_searched.len(),
            "search completed"
        );
        Ok(response)
    }

    /// Query one source: build the target, fetch, extract.
    async fn query_source(
        &self,
        source: Source,
        query: &str,
        page: u32,
    ) -> Result<Vec<VideoRecord>, SearchError> {
        let driver = driver_for(source);
        let target = driver.search_url(query, page);
        tracing::trace!(source = %source, target, "querying source");
        let html = self.fetcher.fetch(&target).await?;
        driver.extract(&html)
    }
}
