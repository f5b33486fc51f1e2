//! Application state and rate limiting.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Per-IP request tracker: (request count, window start time).
type IpTracker = HashMap<IpAddr, (u64, Instant)>;

/// In-memory per-IP fixed-window rate limiter.
pub(crate) struct RateLimiter {
    tracker: Mutex<IpTracker>,
    /// Maximum requests per window.
    pub(crate) max_requests: u64,
    window: Duration,
}

impl RateLimiter {
    pub(crate) fn new(max_requests: u64, window: Duration) -> Self {
        Self {
            tracker: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Check if a request from the given IP is allowed.
    /// Returns Ok(()) if allowed, Err(retry_after_secs) if rate limited.
    pub(crate) async fn check(&self, ip: IpAddr) -> Result<(), u64> {
        self.check_at(ip, Instant::now()).await
    }

    async fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), u64> {
        let mut tracker = self.tracker.lock().await;
        // Expired windows are dropped, so a returning client starts fresh.
        let window = self.window;
        tracker.retain(|_, (_, start)| now.saturating_duration_since(*start) < window);
        let entry = tracker.entry(ip).or_insert((0, now));

        entry.0 += 1;
        if entry.0 > self.max_requests {
            let remaining = self.window.saturating_sub(now.saturating_duration_since(entry.1));
            Err(remaining.as_secs().max(1))
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.tracker.lock().await.len()
    }
}

/// Application state shared across request handlers.
pub(crate) struct AppState {
    pub(crate) rate_limiter: RateLimiter,
    /// Largest script accepted by `POST /`, in bytes.
    pub(crate) max_source_size: usize,
    /// Time budget for one parse.
    pub(crate) parse_timeout: Duration,
}
