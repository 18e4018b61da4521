use std::time::{Duration, Instant};

/// Single-value cache which can still hand out the expired value when the refresh fails.
pub struct Cache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T> Cache<T> {
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The value, if it has been updated within the TTL.
    pub fn get_fresh(&self, now: Instant) -> Option<&T> {
        self.entry
            .as_ref()
            .filter(|(updated_at, _)| now.saturating_duration_since(*updated_at) <= self.ttl)
            .map(|(_, value)| value)
    }

    /// The value regardless of its age.
    pub fn get_stale(&self) -> Option<&T> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    pub fn put(&mut self, now: Instant, value: T) -> &T {
        &self.entry.insert((now, value)).1
    }
}
