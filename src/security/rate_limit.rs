//! Fixed-window rate limiting.
//!
//! Counters reset at fixed window boundaries rather than sliding; a client
//! that exhausts a window waits for the boundary, not for individual
//! requests to age out. Keyed by client IP.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::{RateLimitConfig, RateLimitRule, RouteClassConfig};

struct Window {
    count: u32,
    started: Instant,
}

/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed {
        limit: u32,
        remaining: u32,
        /// Seconds until the current window resets.
        reset_secs: u64,
    },
    Limited {
        /// Minutes until the window resets, rounded to the window length.
        retry_after_mins: u64,
    },
}

/// A single fixed-window counter set.
pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    skip_successful: bool,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(rule: &RateLimitRule) -> Self {
        Self {
            window: Duration::from_secs(rule.window_secs),
            max_requests: rule.max_requests,
            skip_successful: rule.skip_successful,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Whether responses below 400 should be refunded via [`forgive`].
    ///
    /// [`forgive`]: FixedWindowLimiter::forgive
    pub fn skip_successful(&self) -> bool {
        self.skip_successful
    }

    /// Count a request against the key's current window.
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        let elapsed = now.duration_since(window.started);
        if elapsed >= self.window {
            window.count = 0;
            window.started = now;
        }

        if window.count >= self.max_requests {
            return Decision::Limited {
                retry_after_mins: self.window.as_secs() / 60,
            };
        }

        window.count += 1;
        let reset = self.window.saturating_sub(now.duration_since(window.started));
        Decision::Allowed {
            limit: self.max_requests,
            remaining: self.max_requests - window.count,
            reset_secs: reset.as_secs(),
        }
    }

    /// Refund one request, used when successful requests should not count
    /// against the limit.
    pub fn forgive(&self, key: &str) {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        if let Some(window) = windows.get_mut(key) {
            window.count = window.count.saturating_sub(1);
        }
    }

}

/// The four limiters of the defense layer, one per route class.
pub struct LimiterSet {
    pub general: FixedWindowLimiter,
    pub auth: FixedWindowLimiter,
    pub password_reset: FixedWindowLimiter,
    pub booking: FixedWindowLimiter,
}

impl LimiterSet {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            general: FixedWindowLimiter::new(&config.general),
            auth: FixedWindowLimiter::new(&config.auth),
            password_reset: FixedWindowLimiter::new(&config.password_reset),
            booking: FixedWindowLimiter::new(&config.booking),
        }
    }

    /// Pick the limiter for a request path. Longest prefix first, so the
    /// password-reset class can nest under the auth prefix.
    pub fn for_path(&self, path: &str, routes: &RouteClassConfig) -> (&FixedWindowLimiter, &'static str) {
        if path.starts_with(&routes.password_reset_prefix) {
            (&self.password_reset, "password_reset")
        } else if path.starts_with(&routes.auth_prefix) {
            (&self.auth, "auth")
        } else if path.starts_with(&routes.booking_prefix) {
            (&self.booking, "booking")
        } else {
            (&self.general, "general")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(window_secs: u64, max_requests: u32) -> FixedWindowLimiter {
        FixedWindowLimiter::new(&RateLimitRule {
            window_secs,
            max_requests,
            skip_successful: false,
        })
    }

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = limiter(900, 3);
        for remaining in [2, 1, 0] {
            match limiter.check("10.0.0.1") {
                Decision::Allowed { remaining: r, limit, .. } => {
                    assert_eq!(r, remaining);
                    assert_eq!(limit, 3);
                }
                Decision::Limited { .. } => panic!("should not be limited yet"),
            }
        }
        assert_eq!(
            limiter.check("10.0.0.1"),
            Decision::Limited { retry_after_mins: 15 }
        );
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = limiter(900, 1);
        assert!(matches!(limiter.check("10.0.0.1"), Decision::Allowed { .. }));
        assert!(matches!(limiter.check("10.0.0.2"), Decision::Allowed { .. }));
        assert!(matches!(limiter.check("10.0.0.1"), Decision::Limited { .. }));
    }

    #[test]
    fn test_window_resets() {
        let limiter = limiter(60, 1);
        let start = Instant::now();
        assert!(matches!(limiter.check_at("10.0.0.1", start), Decision::Allowed { .. }));
        assert!(matches!(limiter.check_at("10.0.0.1", start), Decision::Limited { .. }));

        let later = start + Duration::from_secs(61);
        assert!(matches!(limiter.check_at("10.0.0.1", later), Decision::Allowed { .. }));
    }

    #[test]
    fn test_forgive_refunds_a_slot() {
        let limiter = limiter(900, 1);
        assert!(matches!(limiter.check("10.0.0.1"), Decision::Allowed { .. }));
        limiter.forgive("10.0.0.1");
        assert!(matches!(limiter.check("10.0.0.1"), Decision::Allowed { .. }));
    }

    #[test]
    fn test_route_class_selection() {
        let set = LimiterSet::new(&RateLimitConfig::default());
        let routes = RouteClassConfig::default();

        assert_eq!(set.for_path("/api/customers", &routes).1, "general");
        assert_eq!(set.for_path("/api/auth/login", &routes).1, "auth");
        assert_eq!(
            set.for_path("/api/auth/reset-password", &routes).1,
            "password_reset"
        );
        assert_eq!(set.for_path("/api/public/booking/slots", &routes).1, "booking");
        assert_eq!(set.for_path("/", &routes).1, "general");
    }
}
