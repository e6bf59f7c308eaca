//! Single-slot read cache
//!
//! Holds one computed value with its insertion time. Readers see either
//! the whole previous value or the whole new one; a slot older than the
//! TTL reads as empty. There is no coordination between `invalidate` and
//! a concurrent recompute, so a stale value can be written back right
//! after an invalidation and live until the TTL passes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;

/// Lifetime of the public listing caches.
pub const DEFAULT_TTL: Duration = Duration::from_secs(2 * 60 * 60);

struct Entry<T> {
    value: Arc<T>,
    stored_at: Instant,
}

pub struct TtlCache<T> {
    slot: ArcSwapOption<Entry<T>>,
    ttl: Duration,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: ArcSwapOption::empty(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value, if present and younger than the TTL.
    pub fn get(&self) -> Option<Arc<T>> {
        let guard = self.slot.load();
        let entry = (*guard).as_ref()?;
        (entry.stored_at.elapsed() < self.ttl).then(|| Arc::clone(&entry.value))
    }

    /// Replace the slot and return the stored value.
    pub fn put(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.slot.store(Some(Arc::new(Entry {
            value: Arc::clone(&value),
            stored_at: Instant::now(),
        })));
        value
    }

    pub fn invalidate(&self) {
        self.slot.store(None);
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_until_put() {
        let cache: TtlCache<Vec<u32>> = TtlCache::default();
        assert!(cache.get().is_none());

        cache.put(vec![1, 2, 3]);
        assert_eq!(cache.get().as_deref(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_invalidate_clears_slot() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put("servicios");
        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_zero_ttl_is_always_stale() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.put(42);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_put_replaces_whole_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let first = cache.put(String::from("a"));
        cache.put(String::from("b"));

        assert_eq!(first.as_str(), "a");
        assert_eq!(cache.get().unwrap().as_str(), "b");
    }
}
