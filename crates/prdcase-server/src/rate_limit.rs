//! Sliding-window rate limiter
//!
//! State lives in this process only: it resets on restart and is not shared
//! between server instances.

use crate::config::RateLimitConfig;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Per-client sliding-window limiter
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: DashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests as usize,
            window,
            hits: DashMap::new(),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }

    /// Record a request from `client`. Returns the time until the oldest
    /// request in the window expires when the budget is used up.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.check_at(client, Instant::now())
    }

    pub fn check_at(&self, client: &str, now: Instant) -> Result<(), Duration> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut hits = self.hits.entry(client.to_string()).or_default();
        hits.retain(|at| now.saturating_duration_since(*at) < self.window);

        if hits.len() >= self.max_requests {
            let oldest = hits.first().copied().unwrap_or(now);
            let retry_after = self
                .window
                .saturating_sub(now.saturating_duration_since(oldest));
            return Err(retry_after);
        }

        hits.push(now);
        Ok(())
    }

    /// Drop clients with no request inside the window
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.hits.retain(|_, hits| {
            hits.last()
                .is_some_and(|at| now.saturating_duration_since(*at) < self.window)
        });
    }

    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }
}
