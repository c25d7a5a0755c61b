use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    // Breaks timestamp ties in favour of the earlier write.
    seq: u64,
}

/// Size-bounded cache with lazy TTL expiry.
///
/// Expired entries are removed only when read. When the cache is full, a write
/// first evicts the entry with the oldest write time, regardless of how
/// recently it was read.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
    max_size: usize,
    next_seq: u64,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_size,
            next_seq: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Get a live value, dropping the entry if it has expired
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store a value stamped with the current time
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.set_at(key, value, Instant::now());
    }

    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) > self.ttl {
            self.entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn set_at(&mut self, key: impl Into<String>, value: V, now: Instant) {
        // A zero-capacity cache stores nothing.
        if self.max_size == 0 {
            return;
        }
        if self.entries.len() >= self.max_size {
            self.evict_oldest();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: now,
                seq,
            },
        );
    }

    /// Whether an entry is stored, live or not. Does not expire anything.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.stored_at, entry.seq))
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            tracing::debug!(key = %key, "Evicting oldest cache entry");
            self.entries.remove(&key);
        }
    }
}
