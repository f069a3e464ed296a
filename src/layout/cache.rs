//! Generation-keyed caches for derived layout tables.
//!
//! A layout manager bumps its [`Generation`] on every structural change.
//! Tables derived from widget sizes remember the key they were computed for
//! and are recomputed on the next query when the key differs, so query
//! methods never hide an unannounced invalidation.

/// Counter identifying one state of a layout manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Advance to a fresh generation.
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Single-entry cache of a value derived for key `K`.
#[derive(Debug, Clone, Default)]
pub(crate) struct GenerationCache<K, V> {
    key: Option<K>,
    value: V,
}

impl<K: PartialEq, V: Default> GenerationCache<K, V> {
    /// Return the cached value for `key`, computing it first if stale.
    pub(crate) fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.key.as_ref() != Some(&key) {
            self.value = compute();
            self.key = Some(key);
        }
        &self.value
    }

    pub(crate) fn clear(&mut self) {
        self.key = None;
        self.value = V::default();
    }
}
