//! Read-through cache for list query results.
//!
//! Keyed by the logical query string (path plus serialized parameters).
//! Entries are transient request results, held in memory only, and expire
//! after a fixed freshness window. A repeated identical query within the
//! window is served from here without touching the network.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Freshness window for cached query results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct Entry<T> {
    inserted: Instant,
    value: T,
}

/// In-memory read-through cache keyed by logical query.
pub struct QueryCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T: Clone> QueryCache<T> {
    /// Creates a cache with the default 5-minute freshness window.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with an explicit freshness window.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key` if it is still fresh.
    ///
    /// Stale entries are evicted on access.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.inserted.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` under `key`, resetting its freshness.
    pub fn insert(&self, key: String, value: T) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key,
            Entry {
                inserted: Instant::now(),
                value,
            },
        );
    }

    /// Number of live entries (stale entries included until accessed).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }
}

impl<T: Clone> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
