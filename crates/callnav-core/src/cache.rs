//! Bounded LRU cache of resolved argument spans.
//!
//! Navigating through one call re-resolves the same parenthesized text over
//! and over. Parsing it again each time is wasted work, so the resolver
//! memoizes by `(call text, keywords-only)`. The text fully determines the
//! parse, which means a stale entry is impossible: an edited call is simply a
//! different key. Old keys age out least-recently-used first.
//!
//! Cached spans are relative to the start of the call text; the resolver
//! shifts them to document offsets on every lookup.

use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::trace;

use crate::span::Span;

/// Cache key: the exact parenthesized text plus the keyword filter flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub keywords_only: bool,
}

impl CacheKey {
    /// Build a key.
    #[must_use]
    pub fn new(text: &str, keywords_only: bool) -> Self {
        Self {
            text: text.to_owned(),
            keywords_only,
        }
    }
}

/// LRU map from [`CacheKey`] to call-relative argument spans.
pub struct ArgCache {
    entries: LruCache<CacheKey, Vec<Span>>,
    hits: u64,
    misses: u64,
}

// LruCache doesn't implement Debug; report the shape instead.
impl fmt::Debug for ArgCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

impl ArgCache {
    /// Create a cache holding at most `capacity` keys (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&mut self, key: &CacheKey) -> Option<&[Span]> {
        if let Some(spans) = self.entries.get(key) {
            self.hits += 1;
            trace!(keywords_only = key.keywords_only, "argument cache hit");
            Some(spans.as_slice())
        } else {
            self.misses += 1;
            trace!(keywords_only = key.keywords_only, "argument cache miss");
            None
        }
    }

    /// Store `spans` under `key`. Returns the key evicted to make room, if
    /// any. Replacing an existing key evicts nothing.
    pub fn insert(&mut self, key: CacheKey, spans: Vec<Span>) -> Option<CacheKey> {
        match self.entries.push(key.clone(), spans) {
            Some((old, _)) if old != key => Some(old),
            _ => None,
        }
    }

    /// Number of cached keys.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Lookups answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to be computed.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn key(i: usize) -> CacheKey {
        CacheKey::new(&format!("(a{i})"), false)
    }

    #[test]
    fn get_after_insert() {
        let mut cache = ArgCache::new(4);
        cache.insert(key(1), vec![Span::new(1, 3)]);
        assert_eq!(cache.get(&key(1)), Some(&[Span::new(1, 3)][..]));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn keyword_flag_is_part_of_key() {
        let mut cache = ArgCache::new(4);
        cache.insert(CacheKey::new("(a=1)", true), vec![Span::new(1, 4)]);
        assert!(cache.get(&CacheKey::new("(a=1)", false)).is_none());
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = ArgCache::new(1000);
        for i in 0..1000 {
            assert_eq!(cache.insert(key(i), Vec::new()), None);
        }
        // Touch key 0 so key 1 becomes the oldest.
        assert!(cache.get(&key(0)).is_some());
        let evicted = cache.insert(key(1000), Vec::new());
        assert_eq!(evicted, Some(key(1)));
        assert_eq!(cache.len(), 1000);
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.get(&key(0)).is_some());
    }

    #[test]
    fn replacing_a_key_evicts_nothing() {
        let mut cache = ArgCache::new(1);
        cache.insert(key(1), Vec::new());
        assert_eq!(cache.insert(key(1), vec![Span::new(0, 1)]), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_is_one() {
        let mut cache = ArgCache::new(0);
        assert!(format!("{cache:?}").contains("capacity: 1"));
        cache.insert(key(1), Vec::new());
        assert_eq!(cache.insert(key(2), Vec::new()), Some(key(1)));
    }

    #[test]
    fn debug_reports_shape() {
        let cache = ArgCache::new(3);
        let dbg = format!("{cache:?}");
        assert!(dbg.contains("capacity: 3"));
    }
}
