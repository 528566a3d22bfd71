//! Process-wide response cache: normalized URL -> (response, stored-at).
//! Entries are immutable once written and replaced wholesale; expiry is
//! checked on read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use nf_core::SummarizeResponse;

pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, (SummarizeResponse, Instant)>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<SummarizeResponse> {
        let entries = self.entries.read().await;
        let (response, stored_at) = entries.get(key)?;
        if stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(response.clone())
    }

    pub async fn put(&self, key: String, response: SummarizeResponse) {
        let mut entries = self.entries.write().await;
        // drop anything already expired while we hold the write lock
        let ttl = self.ttl;
        entries.retain(|_, (_, stored_at)| stored_at.elapsed() < ttl);
        entries.insert(key, (response, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(tag: &str) -> SummarizeResponse {
        SummarizeResponse::failure(tag)
    }

    #[tokio::test]
    async fn test_round_trip_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("k".to_string(), response("a")).await;
        let hit = cache.get("k").await.unwrap();
        assert_eq!(hit.error.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let cache = ResponseCache::new(Duration::from_millis(10));
        cache.put("k".to_string(), response("a")).await;
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_wholesale() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("k".to_string(), response("old")).await;
        cache.put("k".to_string(), response("new")).await;
        assert_eq!(cache.get("k").await.unwrap().error.as_deref(), Some("new"));
    }
}
