use std::time::{Duration, Instant};

use dashmap::DashMap;

const MAX_FAILURES: u32 = 10;
const WINDOW: Duration = Duration::from_secs(15 * 60);

/// Per-email login brute force limiter.
pub struct LoginRateLimiter {
    /// email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check whether a login attempt for this email is allowed.
    pub fn check(&self, email: &str) -> Result<(), ()> {
        if let Some(entry) = self.entries.get(email) {
            let (count, start) = *entry;
            if start.elapsed() < WINDOW && count >= MAX_FAILURES {
                return Err(());
            }
        }
        Ok(())
    }

    /// Record a failed attempt.
    pub fn record_failure(&self, email: &str) {
        let now = Instant::now();
        let mut entry = self.entries.entry(email.to_string()).or_insert((0, now));
        let (count, start) = entry.value_mut();
        if start.elapsed() >= WINDOW {
            *count = 0;
            *start = now;
        }
        *count += 1;
    }

    /// Clear failures after a successful login.
    pub fn record_success(&self, email: &str) {
        self.entries.remove(email);
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
