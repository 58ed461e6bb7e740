//! Collection lookup with a time-bounded memo.

use kudos_core::{Collection, CollectionMemo, Error, FetchStage};

use crate::source::RecordSource;
use crate::tables::{Condition, ListRequest};

/// Records fetched when searching collections by name.
pub const COLLECTION_LOOKUP_LIMIT: u32 = 10;

/// Which collection to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTarget {
    /// Substring the collection name must contain.
    pub contains: String,
    /// Exact name accepted as a fallback.
    pub exact: String,
}

impl Default for CollectionTarget {
    fn default() -> Self {
        Self { contains: "DNC Reviews".into(), exact: "DNC Reviews Collection".into() }
    }
}

/// Resolve the target collection's id, reusing the memo while it is fresh.
///
/// # Errors
///
/// - `Error::Upstream` if the collections table answers non-2xx
/// - `Error::CollectionNotFound` if no returned record matches, listing the
///   names that were returned
pub async fn resolve_collection_id(
    source: &dyn RecordSource, memo: &CollectionMemo, table_id: &str, target: &CollectionTarget,
) -> Result<String, Error> {
    if let Some(id) = memo.get().await {
        tracing::debug!(collection_id = %id, "collection id served from memo");
        return Ok(id);
    }

    let request =
        ListRequest::new(COLLECTION_LOOKUP_LIMIT).filter("name", Condition::Contains(target.contains.clone()));
    let collections: Vec<Collection> = source
        .list_records(table_id, &request)
        .await
        .map_err(|e| e.at(FetchStage::Collections))?
        .iter()
        .map(Collection::from_record)
        .collect();

    let found = collections
        .iter()
        .find(|c| c.matches(&target.contains, &target.exact))
        .cloned();
    let Some(found) = found else {
        let available: Vec<String> = collections.into_iter().filter_map(|c| c.name).collect();
        tracing::warn!(collection = %target.contains, ?available, "collection not found");
        return Err(Error::CollectionNotFound { target: target.contains.clone(), available });
    };

    tracing::info!(collection_id = %found.id, name = ?found.name, "resolved collection");
    memo.remember(found.id.clone()).await;
    Ok(found.id)
}
