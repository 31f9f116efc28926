//! Resilient HTTP fetch layer with User-Agent rotation and retry.
//!
//! [`FetchClient`] performs a single outbound GET with a per-attempt
//! timeout and exponential-backoff retry. The [`Fetcher`] trait fronts it
//! so the orchestrator can be probed and stubbed in tests.

use std::future::Future;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Realistic browser User-Agent strings, one chosen per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// The fetch seam between the orchestrator and the network.
///
/// Production code uses [`FetchClient`]; tests substitute counting or
/// scripted implementations to observe fan-out behaviour without I/O.
pub trait Fetcher: Send + Sync {
    /// Fetch the body at `url`, retrying per the implementation's budget.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, SearchError>> + Send;
}

/// HTTP GET client with timeout and exponential-backoff retry.
///
/// Stateless per call: every attempt is independent and the client is safe
/// to share across concurrent source branches without synchronization.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl FetchClient {
    /// Build a client from configuration.
    ///
    /// The underlying [`reqwest::Client`] has a cookie store, a
    /// per-attempt timeout, limited redirects, and a browser-like
    /// User-Agent (random from the rotation list unless pinned by
    /// `config.user_agent`).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let ua = match config.user_agent {
            Some(ref custom) => custom.clone(),
            None => random_user_agent().to_owned(),
        };

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(ua)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            attempts: config.retry_attempts,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        })
    }

    async fn try_fetch(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?
            .error_for_status()
            .map_err(|e| format!("HTTP status error: {e}"))?;

        response
            .text()
            .await
            .map_err(|e| format!("response read failed: {e}"))
    }

    /// Backoff before attempt number `attempt` (1-based for retries):
    /// the base delay doubled per prior retry, capped at the maximum.
    fn backoff(&self, attempt: u32) -> Duration {
        let doubled = self
            .base_delay
            .saturating_mul(1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX));
        doubled.min(self.max_delay)
    }
}

impl Fetcher for FetchClient {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        let mut last_error = String::from("no attempts made");

        for attempt in 0..self.attempts {
            if attempt > 0 {
                tokio::time::sleep(self.backoff(attempt)).await;
            }

            match self.try_fetch(url).await {
                Ok(body) => {
                    tracing::trace!(url, bytes = body.len(), "fetch succeeded");
                    return Ok(body);
                }
                Err(err) => {
                    tracing::debug!(url, attempt, error = %err, "fetch attempt failed");
                    last_error = err;
                }
            }
        }

        Err(SearchError::FetchFailed(last_error))
    }
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        let client = FetchClient::new(&SearchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert!(FetchClient::new(&config).is_ok());
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let config = SearchConfig {
            retry_base_delay_ms: 100,
            retry_max_delay_ms: 350,
            ..Default::default()
        };
        let client = FetchClient::new(&config).expect("client");
        assert_eq!(client.backoff(1), Duration::from_millis(100));
        assert_eq!(client.backoff(2), Duration::from_millis(200));
        // 400ms capped at the configured maximum.
        assert_eq!(client.backoff(3), Duration::from_millis(350));
        assert_eq!(client.backoff(4), Duration::from_millis(350));
    }

    #[test]
    fn user_agents_list_not_empty() {
        assert!(!USER_AGENTS.is_empty());
        assert_eq!(USER_AGENTS.len(), 5);
    }
}
