//! IP reputation tracking.
//!
//! Per-IP state machine: clean -> accumulating -> blocked. Failed
//! auth-sensitive actions accumulate per IP; the count decays to zero after
//! an idle hour, and crossing the threshold blocks the IP until an operator
//! explicitly unblocks it. There is no automatic time-based unblock.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;

use crate::config::ReputationConfig;
use crate::observability::metrics;

struct AttemptRecord {
    count: u32,
    last_attempt: Instant,
}

/// Snapshot of a blocked IP for the admin surface.
#[derive(Debug, Clone, Serialize)]
pub struct BlockedIp {
    pub ip: String,
    pub attempts: u32,
}

/// Process-wide failed-attempt counters and block set.
pub struct ReputationTracker {
    attempts: DashMap<String, AttemptRecord>,
    blocked: DashMap<String, ()>,
    max_failed_attempts: u32,
    decay_window: Duration,
}

impl ReputationTracker {
    pub fn new(config: &ReputationConfig) -> Self {
        Self {
            attempts: DashMap::new(),
            blocked: DashMap::new(),
            max_failed_attempts: config.max_failed_attempts,
            decay_window: Duration::from_secs(config.decay_window_secs),
        }
    }

    /// Record a failed auth-sensitive action for an IP. Blocks the IP once
    /// the threshold is reached.
    pub fn track_failed_attempt(&self, ip: &str) {
        self.track_failed_attempt_at(ip, Instant::now());
    }

    /// Clock-injectable variant of [`track_failed_attempt`].
    ///
    /// [`track_failed_attempt`]: ReputationTracker::track_failed_attempt
    pub fn track_failed_attempt_at(&self, ip: &str, now: Instant) {
        let mut record = self
            .attempts
            .entry(ip.to_string())
            .or_insert(AttemptRecord {
                count: 0,
                last_attempt: now,
            });

        // Idle IPs start over instead of accumulating forever.
        if now.duration_since(record.last_attempt) > self.decay_window {
            record.count = 0;
        }
        record.count += 1;
        record.last_attempt = now;
        let count = record.count;
        drop(record);

        metrics::record_failed_attempt();
        if count >= self.max_failed_attempts {
            self.blocked.insert(ip.to_string(), ());
            tracing::warn!(ip = %ip, attempts = count, "IP blocked after repeated failed attempts");
        }
    }

    pub fn is_blocked(&self, ip: &str) -> bool {
        self.blocked.contains_key(ip)
    }

    /// Clear both the block and the attempt record, returning the IP to the
    /// clean state.
    pub fn unblock(&self, ip: &str) {
        self.blocked.remove(ip);
        self.attempts.remove(ip);
    }

    pub fn attempt_count(&self, ip: &str) -> u32 {
        self.attempts.get(ip).map(|r| r.count).unwrap_or(0)
    }

    /// Number of IPs with a live attempt record. The map is never pruned
    /// below the block threshold, so this doubles as a growth gauge.
    pub fn tracked_ips(&self) -> usize {
        self.attempts.len()
    }

    pub fn blocked_ips(&self) -> Vec<BlockedIp> {
        self.blocked
            .iter()
            .map(|entry| BlockedIp {
                ip: entry.key().clone(),
                attempts: self.attempt_count(entry.key()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ReputationTracker {
        ReputationTracker::new(&ReputationConfig {
            max_failed_attempts: 10,
            decay_window_secs: 3600,
        })
    }

    #[test]
    fn test_blocks_at_threshold() {
        let tracker = tracker();
        for _ in 0..9 {
            tracker.track_failed_attempt("192.168.1.200");
        }
        assert!(!tracker.is_blocked("192.168.1.200"));

        tracker.track_failed_attempt("192.168.1.200");
        assert!(tracker.is_blocked("192.168.1.200"));
    }

    #[test]
    fn test_unblock_resets_counter() {
        let tracker = tracker();
        for _ in 0..10 {
            tracker.track_failed_attempt("192.168.1.200");
        }
        assert!(tracker.is_blocked("192.168.1.200"));

        tracker.unblock("192.168.1.200");
        assert!(!tracker.is_blocked("192.168.1.200"));
        assert_eq!(tracker.attempt_count("192.168.1.200"), 0);

        // A full fresh run is required to re-block.
        for _ in 0..9 {
            tracker.track_failed_attempt("192.168.1.200");
        }
        assert!(!tracker.is_blocked("192.168.1.200"));
        tracker.track_failed_attempt("192.168.1.200");
        assert!(tracker.is_blocked("192.168.1.200"));
    }

    #[test]
    fn test_decay_window_restarts_count() {
        let tracker = tracker();
        let start = Instant::now();
        for _ in 0..5 {
            tracker.track_failed_attempt_at("10.1.1.1", start);
        }
        assert_eq!(tracker.attempt_count("10.1.1.1"), 5);

        // More than an hour idle: next attempt starts at 1.
        let later = start + Duration::from_secs(3601);
        tracker.track_failed_attempt_at("10.1.1.1", later);
        assert_eq!(tracker.attempt_count("10.1.1.1"), 1);
        assert!(!tracker.is_blocked("10.1.1.1"));
    }

    #[test]
    fn test_attempts_within_window_accumulate() {
        let tracker = tracker();
        let start = Instant::now();
        tracker.track_failed_attempt_at("10.1.1.2", start);
        tracker.track_failed_attempt_at("10.1.1.2", start + Duration::from_secs(3599));
        assert_eq!(tracker.attempt_count("10.1.1.2"), 2);
    }

    #[test]
    fn test_ips_are_independent() {
        let tracker = tracker();
        for _ in 0..10 {
            tracker.track_failed_attempt("10.2.2.1");
        }
        assert!(tracker.is_blocked("10.2.2.1"));
        assert!(!tracker.is_blocked("10.2.2.2"));
        assert_eq!(tracker.tracked_ips(), 1);
    }
}
