//! Time-bounded memo for the resolved collection id.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Default lifetime of a resolved collection id.
pub const DEFAULT_COLLECTION_TTL: Duration = Duration::from_secs(3600);

/// Holds at most one collection id and the instant it was resolved.
///
/// There is no invalidation other than the TTL.
#[derive(Debug)]
pub struct CollectionMemo {
    slot: Mutex<Option<(String, Instant)>>,
    ttl: Duration,
}

impl Default for CollectionMemo {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION_TTL)
    }
}

impl CollectionMemo {
    pub fn new(ttl: Duration) -> Self {
        Self { slot: Mutex::new(None), ttl }
    }

    /// The memoized id, if one was stored less than `ttl` ago.
    pub async fn get(&self) -> Option<String> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|(_, resolved_at)| resolved_at.elapsed() < self.ttl)
            .map(|(id, _)| id.clone())
    }

    pub async fn remember(&self, id: impl Into<String>) {
        *self.slot.lock().await = Some((id.into(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_memo() {
        let memo = CollectionMemo::default();
        assert!(memo.get().await.is_none());
    }

    #[tokio::test]
    async fn test_remember_then_get() {
        let memo = CollectionMemo::default();
        memo.remember("recCollection").await;
        assert_eq!(memo.get().await.as_deref(), Some("recCollection"));
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let memo = CollectionMemo::new(Duration::ZERO);
        memo.remember("recCollection").await;
        assert!(memo.get().await.is_none());
    }

    #[tokio::test]
    async fn test_remember_replaces_previous_id() {
        let memo = CollectionMemo::default();
        memo.remember("old").await;
        memo.remember("new").await;
        assert_eq!(memo.get().await.as_deref(), Some("new"));
    }
}
