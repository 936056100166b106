use crate::provider::{LiveIndexProvider, LiveReading};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Memoizes readings per city for a fixed window. Absent readings are cached
/// too, so an unreachable feed is not hammered within one window.
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, LiveReading)>>,
}

impl<P: LiveIndexProvider> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn reading_at(&self, city: &str, now: Instant) -> LiveReading {
        if let Some(reading) = self.lookup(city, now) {
            debug!(city, "live AQI cache hit");
            return reading;
        }
        let reading = self.inner.live_reading(city);
        self.lock_entries().insert(city.to_string(), (now, reading));
        reading
    }

    pub fn invalidate(&self) {
        self.lock_entries().clear();
    }

    /// Entries are plain copies, so a panic while holding the lock cannot
    /// leave them half-written; a poisoned lock is taken over.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, (Instant, LiveReading)>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("live AQI cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lookup(&self, city: &str, now: Instant) -> Option<LiveReading> {
        let entries = self.lock_entries();
        let (stored_at, reading) = entries.get(city)?;
        (now.saturating_duration_since(*stored_at) < self.ttl).then_some(*reading)
    }
}

impl<P: LiveIndexProvider> LiveIndexProvider for CachedProvider<P> {
    fn live_reading(&self, city: &str) -> LiveReading {
        self.reading_at(city, Instant::now())
    }
}
