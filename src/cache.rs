//! Bounded LRU cache for aggregated search responses.
//!
//! Maps a normalized [`SearchKey`] to a previously computed
//! [`SearchResponse`]. Capacity eviction removes the least-recently-accessed
//! entry; recency is updated on both hits and inserts. Entries older than
//! the TTL are treated as absent and removed lazily by the access that
//! discovers them. Eviction order is deterministic, which is why this is
//! explicit bookkeeping rather than an off-the-shelf admission-policy cache.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::types::{SearchKey, SearchResponse};

struct CacheEntry {
    response: SearchResponse,
    created_at: Instant,
    last_access: u64,
}

struct CacheState {
    entries: HashMap<SearchKey, CacheEntry>,
    // Monotonic access counter; higher = more recently used.
    tick: u64,
}

/// Thread-safe LRU + TTL cache for search responses.
///
/// All operations are atomic with respect to each other: interleaved
/// `get`/`put` from concurrent searches cannot corrupt capacity or recency
/// bookkeeping.
pub struct ResultCache {
    state: Mutex<CacheState>,
    capacity: usize,
    ttl: Duration,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` entries, each fresh for `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                tick: 0,
            }),
            capacity,
            ttl,
        }
    }

    /// Look up a fresh entry, updating its recency.
    ///
    /// Returns `None` for keys never stored and for stored-but-expired
    /// entries; an expired entry is evicted by the access that finds it.
    pub fn get(&self, key: &SearchKey) -> Option<SearchResponse> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let expired = match state.entries.get(key) {
            Some(entry) => entry.created_at.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            state.entries.remove(key);
            return None;
        }

        state.tick += 1;
        let tick = state.tick;
        let entry = state.entries.get_mut(key)?;
        entry.last_access = tick;
        Some(entry.response.clone())
    }

    /// Insert or overwrite an entry, evicting the least-recently-accessed
    /// entry while over capacity.
    pub fn put(&self, key: SearchKey, response: SearchResponse) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        state.tick += 1;
        let tick = state.tick;
        state.entries.insert(
            key,
            CacheEntry {
                response,
                created_at: Instant::now(),
                last_access: tick,
            },
        );

        while state.entries.len() > self.capacity {
            let Some(oldest) = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            state.entries.remove(&oldest);
        }
    }

    /// Number of entries currently held (including not-yet-discovered
    /// expired ones).
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
