//! Memoizing wrapper around a pixel provider.

use crate::engine::PixelProvider;
use crate::lru::LruCache;
use std::cell::RefCell;

/// A [`PixelProvider`] that remembers recently resolved sprites.
///
/// Hashing a large item set touches the same sprites repeatedly (many
/// server items share one client appearance); the cache keeps the hottest
/// lookups in memory. Misses are cached too, so a hole in the sprite
/// store is not re-queried for every item.
///
/// Single-threaded by design, like the rest of the engine.
pub struct CachingPixelProvider<P> {
    inner: P,
    cache: RefCell<LruCache<u32, Option<Vec<u8>>>>,
}

impl<P: PixelProvider> CachingPixelProvider<P> {
    /// Wraps `inner` with a cache of at most `max_size` sprites.
    pub fn new(inner: P, max_size: usize) -> Self {
        Self {
            inner,
            cache: RefCell::new(LruCache::new(max_size)),
        }
    }

    /// Number of currently cached lookups.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Drops all cached lookups.
    pub fn clear(&mut self) {
        self.cache.borrow_mut().clear();
    }

    /// Unwraps the inner provider.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: PixelProvider> PixelProvider for CachingPixelProvider<P> {
    fn sprite_pixels(&self, sprite_id: u32) -> Option<Vec<u8>> {
        let mut cache = self.cache.borrow_mut();
        if let Some(hit) = cache.get(&sprite_id) {
            return hit.clone();
        }
        let resolved = self.inner.sprite_pixels(sprite_id);
        cache.insert(sprite_id, resolved.clone());
        resolved
    }
}
