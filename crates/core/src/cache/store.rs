//! Keyed cache of materialized testimonial lists.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::Error;
use crate::model::Testimonial;

/// A materialized list together with the fingerprint it was built for.
///
/// The data is safe to serve only while `hash` equals the fingerprint
/// recomputed from the collection's current join records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub hash: String,
    pub data: Vec<Testimonial>,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(hash: impl Into<String>, data: Vec<Testimonial>) -> Self {
        Self { hash: hash.into(), data, timestamp: Utc::now() }
    }
}

/// Cache key for a collection's testimonials.
pub fn cache_key(collection_id: &str) -> String {
    format!("testimonials-{collection_id}")
}

/// Storage for materialized testimonial lists.
///
/// Callers treat failures as best-effort: a failed read is a miss and a
/// failed write still returns the freshly built data.
#[async_trait]
pub trait TestimonialCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, Error>;

    async fn set(&self, key: &str, entry: CacheEntry) -> Result<(), Error>;
}

/// Process-wide in-memory cache. Entries live until the process exits.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl TestimonialCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, entry: CacheEntry) -> Result<(), Error> {
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;

    fn testimonial(id: &str, order: f64) -> Testimonial {
        Testimonial::from_record(&RawRecord::with_fields(id, serde_json::json!({"name": id})), order)
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key("rec123"), "testimonials-rec123");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = MemoryCache::new();
        assert!(cache.get("testimonials-none").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        let entry = CacheEntry::new("abc", vec![testimonial("t1", 1.0)]);
        cache.set("testimonials-c1", entry.clone()).await.unwrap();

        let found = cache.get("testimonials-c1").await.unwrap().unwrap();
        assert_eq!(found, entry);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_overwrites_slot() {
        let cache = MemoryCache::new();
        cache.set("k", CacheEntry::new("h1", vec![])).await.unwrap();
        cache.set("k", CacheEntry::new("h2", vec![testimonial("t1", 1.0)])).await.unwrap();

        let found = cache.get("k").await.unwrap().unwrap();
        assert_eq!(found.hash, "h2");
        assert_eq!(found.data.len(), 1);
        assert_eq!(cache.len().await, 1);
    }
}
