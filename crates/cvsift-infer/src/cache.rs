//! LRU vector cache and a caching decorator for any embedder.
//!
//! Résumés repeat the same words many times and the skill vocabulary is
//! scored against every token, so word vectors are memoized per engine.
//! Cached vectors are pure functions of their key; caching never changes results.

use std::collections::HashMap;
use std::sync::Arc;

use ndarray::Array1;
use parking_lot::Mutex;

use crate::embedder::{EmbedderBackend, EmbeddingResult};

/// Default capacity: enough for the distinct words of several résumés.
pub const DEFAULT_CACHE_SIZE: usize = 4096;

/// Thread-safe LRU cache of word vectors.
pub struct VectorCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, Array1<f32>>,
    order: Vec<String>,
    max_size: usize,
    hits: u64,
    misses: u64,
}

impl VectorCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size),
                order: Vec::with_capacity(max_size),
                max_size: max_size.max(1),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Get a cached vector, refreshing its recency.
    pub fn get(&self, key: &str) -> Option<Array1<f32>> {
        let mut inner = self.inner.lock();
        match inner.entries.get(key).cloned() {
            Some(vector) => {
                inner.hits += 1;
                if let Some(pos) = inner.order.iter().position(|k| k == key) {
                    let k = inner.order.remove(pos);
                    inner.order.push(k);
                }
                Some(vector)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert a vector, evicting the least recently used entry at capacity.
    pub fn put(&self, key: String, vector: Array1<f32>) {
        let mut inner = self.inner.lock();

        if inner.entries.insert(key.clone(), vector).is_some() {
            inner.order.retain(|k| k != &key);
            inner.order.push(key);
            return;
        }

        inner.order.push(key);
        while inner.entries.len() > inner.max_size && !inner.order.is_empty() {
            let oldest = inner.order.remove(0);
            inner.entries.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        let inner = self.inner.lock();
        (inner.hits, inner.misses)
    }
}

/// Embedder decorator that memoizes vectors in a [`VectorCache`].
pub struct CachedEmbedder {
    backend: Arc<dyn EmbedderBackend>,
    cache: VectorCache,
}

impl CachedEmbedder {
    pub fn new(backend: Arc<dyn EmbedderBackend>, max_size: usize) -> Self {
        Self {
            backend,
            cache: VectorCache::new(max_size),
        }
    }

    pub fn cache(&self) -> &VectorCache {
        &self.cache
    }
}

impl EmbedderBackend for CachedEmbedder {
    fn embed(&self, text: &str) -> Option<EmbeddingResult> {
        if let Some(embedding) = self.cache.get(text) {
            return Some(EmbeddingResult {
                embedding,
                cached: true,
            });
        }

        let result = self.backend.embed(text)?;
        self.cache.put(text.to_string(), result.embedding.clone());
        Some(result)
    }

    fn dimension(&self) -> usize {
        self.backend.dimension()
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::SubwordEmbedder;
    use ndarray::array;

    #[test]
    fn test_cache_hit_and_miss() {
        let cache = VectorCache::new(10);
        assert!(cache.get("python").is_none());

        cache.put("python".into(), array![1.0, 2.0, 3.0]);
        assert_eq!(cache.get("python").unwrap(), array![1.0, 2.0, 3.0]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let cache = VectorCache::new(2);
        cache.put("a".into(), array![1.0]);
        cache.put("b".into(), array![2.0]);
        // Touch "a" so "b" becomes the eviction candidate
        assert!(cache.get("a").is_some());

        cache.put("c".into(), array![3.0]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_cached_embedder_marks_second_lookup() {
        let embedder = CachedEmbedder::new(Arc::new(SubwordEmbedder::default()), 16);
        let first = embedder.embed("docker").unwrap();
        let second = embedder.embed("docker").unwrap();
        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.embedding, second.embedding);
        assert_eq!(embedder.cache().len(), 1);
    }
}
