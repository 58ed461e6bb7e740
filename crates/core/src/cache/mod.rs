//! In-process caching for the testimonials endpoint.
//!
//! This module provides:
//!
//! - A change fingerprint over collection membership and order
//! - A keyed testimonial cache behind the [`TestimonialCache`] trait
//! - A single-slot memo for the resolved collection id

pub mod collection;
pub mod hash;
pub mod store;

pub use crate::Error;

pub use collection::CollectionMemo;
pub use hash::compute_change_hash;
pub use store::{CacheEntry, MemoryCache, TestimonialCache, cache_key};
