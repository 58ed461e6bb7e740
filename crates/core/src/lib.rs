//! Core types and shared functionality for kudos.
//!
//! This crate provides:
//! - Table record model with declarative field lookup
//! - Change-detection hashing and the in-process testimonial cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod fields;
pub mod model;
pub mod record;

pub use cache::{CacheEntry, CollectionMemo, MemoryCache, TestimonialCache};
pub use error::{Error, FetchStage};
pub use model::{Collection, CollectionLink, Testimonial};
pub use record::RawRecord;
