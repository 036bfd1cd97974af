//! Guest checkout rate limiting
//!
//! Sliding-window limiter keyed by IP+email. The backing store is behind a
//! trait so a shared external store can be injected when running more than
//! one instance; the in-memory [`MemoryRateLimitStore`] is sufficient for a
//! single instance and prunes expired hits on every access.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;

use crate::utils::time::now_millis;

/// Backing store for the sliding-window limiter
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record a hit for `key` at `now_ms` and return the number of hits still
    /// inside the window ending at `now_ms`.
    async fn record_hit(&self, key: &str, now_ms: i64, window_ms: i64) -> u32;
}

/// In-memory store backed by a concurrent map
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    hits: DashMap<String, Vec<i64>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn record_hit(&self, key: &str, now_ms: i64, window_ms: i64) -> u32 {
        let mut entry = self.hits.entry(key.to_string()).or_default();
        let cutoff = now_ms - window_ms;
        entry.retain(|&ts| ts > cutoff);
        entry.push(now_ms);
        entry.len() as u32
    }
}

/// Guest order rate limiter
pub struct GuestRateLimiter {
    store: Arc<dyn RateLimitStore>,
    max_per_window: u32,
    window_ms: i64,
}

impl GuestRateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, max_per_window: u32, window_secs: u64) -> Self {
        Self {
            store,
            max_per_window,
            window_ms: (window_secs as i64) * 1000,
        }
    }

    /// In-memory limiter with the given bounds
    pub fn in_memory(max_per_window: u32, window_secs: u64) -> Self {
        Self::new(
            Arc::new(MemoryRateLimitStore::new()),
            max_per_window,
            window_secs,
        )
    }

    /// Record a guest order attempt, rejecting when the window is exhausted
    pub async fn check(&self, ip: &str, email: &str) -> AppResult<()> {
        let key = format!("{ip}|{}", email.to_lowercase());
        let count = self
            .store
            .record_hit(&key, now_millis(), self.window_ms)
            .await;

        if count > self.max_per_window {
            tracing::warn!(ip, email, count, "Guest order rate limit exceeded");
            return Err(AppError::new(ErrorCode::GuestRateLimited)
                .with_detail("retry_after_secs", self.window_ms / 1000));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allows_up_to_limit() {
        let limiter = GuestRateLimiter::in_memory(3, 3600);
        for _ in 0..3 {
            assert!(limiter.check("1.2.3.4", "a@b.com").await.is_ok());
        }
        let err = limiter.check("1.2.3.4", "a@b.com").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::GuestRateLimited);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = GuestRateLimiter::in_memory(1, 3600);
        assert!(limiter.check("1.2.3.4", "a@b.com").await.is_ok());
        assert!(limiter.check("1.2.3.4", "other@b.com").await.is_ok());
        assert!(limiter.check("5.6.7.8", "a@b.com").await.is_ok());
        assert!(limiter.check("1.2.3.4", "a@b.com").await.is_err());
    }

    #[tokio::test]
    async fn test_email_case_insensitive() {
        let limiter = GuestRateLimiter::in_memory(1, 3600);
        assert!(limiter.check("1.2.3.4", "A@B.com").await.is_ok());
        assert!(limiter.check("1.2.3.4", "a@b.COM").await.is_err());
    }

    #[tokio::test]
    async fn test_window_pruning() {
        let store = MemoryRateLimitStore::new();
        // Hits older than the window are pruned on the next access
        assert_eq!(store.record_hit("k", 1_000, 500).await, 1);
        assert_eq!(store.record_hit("k", 1_200, 500).await, 2);
        assert_eq!(store.record_hit("k", 2_000, 500).await, 1);
    }
}
