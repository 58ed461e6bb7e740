//! Seam between the testimonials pipeline and the table backend.

use async_trait::async_trait;
use kudos_core::RawRecord;

use crate::tables::{ListRequest, TablesError};

/// Anything that can list table records.
///
/// [`crate::TablesClient`] is the production implementation.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn list_records(&self, table_id: &str, request: &ListRequest) -> Result<Vec<RawRecord>, TablesError>;
}
