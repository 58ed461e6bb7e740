//! Client code for kudos.
//!
//! This crate provides the table API client, the [`RecordSource`] seam the
//! testimonials pipeline reads through, and the pipeline itself: collection
//! resolution, change detection and materialization.

pub mod source;
pub mod tables;
pub mod testimonials;

pub use source::RecordSource;
pub use tables::{Condition, ListRequest, TablesClient, TablesConfig, TablesError};
pub use testimonials::{CacheOutcome, CacheStatus, CollectionTarget, Loaded, TableIds, TestimonialsService};
