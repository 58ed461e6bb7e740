//! Testimonials pipeline with change-detected caching.
//!
//! A request runs in two stages:
//!
//! 1. Resolve the collection id (memoized) and fetch its join records, which
//!    are cheap. Fingerprint membership and order with
//!    [`compute_change_hash`].
//! 2. Only when the fingerprint differs from the cached entry's, fetch the
//!    full testimonial records, join them to the links and cache the result.
//!
//! Concurrent misses for the same collection each run stage 2; the cache
//! write is an idempotent overwrite of one slot.

pub mod materialize;
pub mod resolver;

pub use materialize::{TESTIMONIALS_LIMIT, materialize};
pub use resolver::{COLLECTION_LOOKUP_LIMIT, CollectionTarget, resolve_collection_id};

use std::sync::Arc;

use kudos_core::cache::{compute_change_hash, cache_key};
use kudos_core::config::AppConfig;
use kudos_core::{CacheEntry, CollectionLink, CollectionMemo, Error, FetchStage, Testimonial, TestimonialCache};

use crate::source::RecordSource;
use crate::tables::{Condition, ListRequest, TablesClient, TablesConfig};

/// Join records fetched per collection.
pub const LINKS_LIMIT: u32 = 100;

/// Column on the join table referencing the collection.
const LINK_COLLECTION_COLUMN: &str = "Collection";

/// Table ids within the testimonials base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIds {
    pub collections: String,
    pub links: String,
    pub testimonials: String,
}

/// Whether a response was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// Cache status and fingerprint of a response that went through hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOutcome {
    pub status: CacheStatus,
    pub hash: String,
}

/// Result of [`TestimonialsService::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub testimonials: Vec<Testimonial>,
    /// Absent when the collection had nothing to fingerprint.
    pub cache: Option<CacheOutcome>,
}

impl Loaded {
    fn empty() -> Self {
        Self { testimonials: Vec::new(), cache: None }
    }
}

/// Serves a collection's testimonials, refetching full records only when
/// membership or order changed.
pub struct TestimonialsService {
    source: Arc<dyn RecordSource>,
    cache: Arc<dyn TestimonialCache>,
    memo: Arc<CollectionMemo>,
    tables: TableIds,
    target: CollectionTarget,
}

impl TestimonialsService {
    pub fn new(
        source: Arc<dyn RecordSource>,
        cache: Arc<dyn TestimonialCache>,
        memo: Arc<CollectionMemo>,
        tables: TableIds,
        target: CollectionTarget,
    ) -> Self {
        Self { source, cache, memo, tables, target }
    }

    /// Build a service backed by the tables HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any table backend secret is missing.
    pub fn from_config(config: &AppConfig, cache: Arc<dyn TestimonialCache>) -> Result<Self, Error> {
        let settings = config.require_tables()?;
        let client = TablesClient::new(TablesConfig::from_settings(&settings, config))
            .map_err(|e| Error::Config(e.to_string()))?;

        let tables = TableIds {
            collections: settings.collections_table_id,
            links: settings.links_table_id,
            testimonials: settings.testimonials_table_id,
        };
        let target = CollectionTarget {
            contains: config.collection_match.clone(),
            exact: config.collection_exact.clone(),
        };

        Ok(Self::new(
            Arc::new(client),
            cache,
            Arc::new(CollectionMemo::new(config.collection_ttl())),
            tables,
            target,
        ))
    }

    /// Load the collection's testimonials, sorted by display order.
    pub async fn load(&self) -> Result<Loaded, Error> {
        let collection_id =
            resolve_collection_id(self.source.as_ref(), &self.memo, &self.tables.collections, &self.target).await?;

        let links = self.fetch_links(&collection_id).await?;
        if links.is_empty() {
            tracing::debug!(%collection_id, "collection has no testimonials");
            return Ok(Loaded::empty());
        }

        let hash = compute_change_hash(&links);
        let key = cache_key(&collection_id);

        match self.cache.get(&key).await {
            Ok(Some(entry)) if entry.hash == hash => {
                tracing::debug!(%collection_id, %hash, count = entry.data.len(), "testimonials cache hit");
                return Ok(Loaded {
                    testimonials: entry.data,
                    cache: Some(CacheOutcome { status: CacheStatus::Hit, hash }),
                });
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(%collection_id, error = %e, "cache read failed; treating as miss"),
        }

        if links.iter().all(|l| l.testimonial_id.is_none()) {
            tracing::debug!(%collection_id, "no link references a testimonial");
            return Ok(Loaded::empty());
        }

        let records = self
            .source
            .list_records(&self.tables.testimonials, &ListRequest::new(TESTIMONIALS_LIMIT))
            .await
            .map_err(|e| e.at(FetchStage::Testimonials))?;

        let testimonials = materialize(&links, &records);
        tracing::info!(
            %collection_id,
            %hash,
            links = links.len(),
            count = testimonials.len(),
            "materialized testimonials"
        );

        if let Err(e) = self.cache.set(&key, CacheEntry::new(hash.clone(), testimonials.clone())).await {
            tracing::warn!(%collection_id, error = %e, "cache write failed");
        }

        Ok(Loaded { testimonials, cache: Some(CacheOutcome { status: CacheStatus::Miss, hash }) })
    }

    async fn fetch_links(&self, collection_id: &str) -> Result<Vec<CollectionLink>, Error> {
        let request = ListRequest::new(LINKS_LIMIT)
            .filter(LINK_COLLECTION_COLUMN, Condition::In(vec![collection_id.to_string()]));

        let records = self
            .source
            .list_records(&self.tables.links, &request)
            .await
            .map_err(|e| e.at(FetchStage::CollectionTestimonials))?;

        Ok(records.iter().map(CollectionLink::from_record).collect())
    }
}
