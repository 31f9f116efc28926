//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls fetch timeouts, the retry budget, result
//! caching, and the outbound identifying header. All knobs are supplied at
//! construction time; there is no runtime reload.

use crate::error::SearchError;

/// Configuration for the search aggregation engine.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-attempt HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum fetch attempts per source before giving up.
    pub retry_attempts: u32,
    /// Backoff delay before the second attempt, in milliseconds. Doubles
    /// with each further attempt.
    pub retry_base_delay_ms: u64,
    /// Upper bound on the backoff delay, in milliseconds.
    pub retry_max_delay_ms: u64,
    /// Maximum number of cached search responses.
    pub cache_capacity: usize,
    /// How long a cached response stays fresh, in seconds. Set to 0 to
    /// make entries expire immediately (effectively disabling the cache).
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            retry_attempts: 3,
            retry_base_delay_ms: 500,
            retry_max_delay_ms: 4_000,
            cache_capacity: 100,
            cache_ttl_seconds: 600,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `retry_attempts` must be greater than 0
    /// - `cache_capacity` must be greater than 0
    /// - `retry_base_delay_ms` must be <= `retry_max_delay_ms`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.retry_attempts == 0 {
            return Err(SearchError::Config(
                "retry_attempts must be greater than 0".into(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(SearchError::Config(
                "cache_capacity must be greater than 0".into(),
            ));
        }
        if self.retry_base_delay_ms > self.retry_max_delay_ms {
            return Err(SearchError::Config(
                "retry_base_delay_ms must be <= retry_max_delay_ms".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_base_delay_ms, 500);
        assert_eq!(config.retry_max_delay_ms, 4_000);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_retry_attempts_rejected() {
        let config = SearchConfig {
            retry_attempts: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retry_attempts"));
    }

    #[test]
    fn zero_cache_capacity_rejected() {
        let config = SearchConfig {
            cache_capacity: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache_capacity"));
    }

    #[test]
    fn inverted_backoff_range_rejected() {
        let config = SearchConfig {
            retry_base_delay_ms: 5_000,
            retry_max_delay_ms: 1_000,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retry_base_delay_ms"));
    }

    #[test]
    fn zero_ttl_is_valid() {
        let config = SearchConfig {
            cache_ttl_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_user_agent() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(config.user_agent.as_deref(), Some("CustomBot/1.0"));
        assert!(config.validate().is_ok());
    }
}
