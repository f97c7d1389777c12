//! Translation cache.
//!
//! Maps original statement text to its translation. Translation is a pure
//! function of the text, so entries are never invalidated and a race between
//! two writers of the same key stores the same value twice.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Thread-safe statement translation cache.
///
/// Keys are compared byte for byte: statements differing only in whitespace
/// or case get their own entries.
#[derive(Debug)]
pub struct TranslationCache {
    entries: DashMap<String, String>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl TranslationCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn lookup(&self, original: &str) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        match self.entries.get(original) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn store(&self, original: &str, translated: &str) {
        if !self.config.enabled {
            return;
        }
        self.entries
            .insert(original.to_string(), translated.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_cache_hit_miss() {
        let cache = TranslationCache::default();

        assert!(cache.lookup("select * from a").is_none());

        cache.store("select * from a", "select * from a");
        assert_eq!(cache.lookup("select * from a").as_deref(), Some("select * from a"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_keys_are_exact_text() {
        let cache = TranslationCache::default();
        cache.store("select * from a", "x");
        assert!(cache.lookup("SELECT * FROM a").is_none());
        assert!(cache.lookup("select *  from a").is_none());
    }

    #[test]
    fn test_cache_disabled() {
        let cache = TranslationCache::new(CacheConfig { enabled: false });

        cache.store("select * from a", "x");
        assert!(cache.lookup("select * from a").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_store_and_lookup() {
        let cache = Arc::new(TranslationCache::default());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("select {} from t{}", i, n % 2);
                        cache.store(&key, &key.to_uppercase());
                        assert_eq!(cache.lookup(&key), Some(key.to_uppercase()));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 200);
    }

    #[test]
    fn test_empty_stats_hit_rate() {
        assert_eq!(TranslationCache::default().stats().hit_rate(), 0.0);
    }
}
