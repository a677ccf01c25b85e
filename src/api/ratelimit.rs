//! Fixed-window request throttling for the content endpoints.
//!
//! Composition calls fan out to a paid generation backend, so the
//! public endpoint is throttled per client address. State is in-memory
//! and lock-free; a restart forgives everyone, which is acceptable for
//! this traffic class.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use dashmap::DashMap;

/// Per-client request tracker (keyed by forwarded client address).
#[derive(Clone)]
pub struct RequestThrottle {
    data: Arc<DashMap<String, Vec<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RequestThrottle {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            data: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    /// Allow `max_requests` per client per minute.
    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Record a request for `client`.
    ///
    /// Returns `None` when the request is admitted, or
    /// `Some(retry_after_seconds)` when the client is over its window.
    pub fn check(&self, client: &str) -> Option<u64> {
        let now = Instant::now();
        let mut times = self.data.entry(client.to_string()).or_default();

        // Drop requests that have aged out of the window
        times.retain(|&t| now.duration_since(t) < self.window);

        if times.len() >= self.max_requests {
            let oldest = times.first().copied().unwrap_or(now);
            let retry_after = self
                .window
                .saturating_sub(now.duration_since(oldest))
                .as_secs()
                .max(1);
            return Some(retry_after);
        }

        times.push(now);
        None
    }
}

/// Best-effort client key: first `X-Forwarded-For` hop, else a shared
/// bucket for direct connections.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "direct".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_admits_up_to_limit_then_throttles() {
        let throttle = RequestThrottle::new(3, Duration::from_secs(60));

        assert_eq!(throttle.check("10.0.0.1"), None);
        assert_eq!(throttle.check("10.0.0.1"), None);
        assert_eq!(throttle.check("10.0.0.1"), None);

        let retry = throttle.check("10.0.0.1").expect("fourth request throttled");
        assert!(retry >= 1 && retry <= 60);

        // Other clients are unaffected
        assert_eq!(throttle.check("10.0.0.2"), None);
    }

    #[test]
    fn test_window_expiry_readmits() {
        let throttle = RequestThrottle::new(1, Duration::from_millis(10));

        assert_eq!(throttle.check("10.0.0.1"), None);
        assert!(throttle.check("10.0.0.1").is_some());

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(throttle.check("10.0.0.1"), None);
    }

    #[test]
    fn test_client_key_from_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_key(&headers), "203.0.113.9");

        assert_eq!(client_key(&HeaderMap::new()), "direct");
    }
}
