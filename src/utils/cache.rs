//! Caching utilities for ytdown

use moka::future::Cache;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Simple in-memory cache with TTL
#[derive(Clone)]
pub struct MemoryCache<K, V> {
    cache: Arc<Mutex<HashMap<K, CachedValue<V>>>>,
}

#[derive(Clone)]
struct CachedValue<V> {
    value: V,
    expires_at: Instant,
}

impl<K, V> MemoryCache<K, V>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(cached_value) = cache.get(key) {
            if cached_value.expires_at > Instant::now() {
                return Some(cached_value.value.clone());
            } else {
                cache.remove(key);
            }
        }
        None
    }

    pub fn insert(&self, key: K, value: V, ttl: Duration) {
        let mut cache = self.cache.lock().unwrap();
        cache.insert(
            key,
            CachedValue {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut cache = self.cache.lock().unwrap();
        cache.remove(key).map(|cached_value| cached_value.value)
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.clear();
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// High-performance async cache using moka
pub type AsyncCache<K, V> = Cache<K, V>;

/// Create a new async cache with TTL
pub fn new_async_cache<K, V>(ttl: Duration) -> AsyncCache<K, V>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder().time_to_live(ttl).build()
}

/// Create a new async cache with TTL and max capacity
pub fn new_async_cache_with_capacity<K, V>(ttl: Duration, max_capacity: u64) -> AsyncCache<K, V>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .time_to_live(ttl)
        .max_capacity(max_capacity)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_memory_cache() {
        let cache = MemoryCache::new();

        cache.insert("key1", "value1", Duration::from_secs(1));
        assert_eq!(cache.get(&"key1"), Some("value1"));

        thread::sleep(Duration::from_millis(1100));
        assert_eq!(cache.get(&"key1"), None);

        cache.insert("key2", "value2", Duration::from_secs(10));
        assert_eq!(cache.remove(&"key2"), Some("value2"));
        assert_eq!(cache.get(&"key2"), None);

        cache.insert("key3", "value3", Duration::from_secs(10));
        cache.clear();
        assert_eq!(cache.get(&"key3"), None);
    }

    #[tokio::test]
    async fn test_async_cache() {
        let cache = new_async_cache(Duration::from_secs(1));

        cache.insert("key1", "value1").await;
        assert_eq!(cache.get(&"key1").await, Some("value1"));

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get(&"key1").await, None);
    }

    #[tokio::test]
    async fn test_async_cache_capacity() {
        let cache = new_async_cache_with_capacity(Duration::from_secs(60), 2);
        cache.insert("a", 1).await;
        assert_eq!(cache.get(&"a").await, Some(1));
    }
}
