//! Poison-tolerant locking for the widget tree.
//!
//! Widgets are shared as `Arc<RwLock<dyn Widget>>` and every container owns a
//! tree lock that serialises layout passes. A panic inside a widget's size
//! query (or inside a caller holding a widget lock) poisons the lock; layout
//! state is plain geometry that the next pass overwrites, so every access in
//! this crate recovers the guard instead of propagating the poison.
//!
//! | Lock | Helper |
//! |------|--------|
//! | container tree lock (`Mutex`) | [`lock_recover`] |
//! | widget read (size, visibility) | [`read_recover`] |
//! | widget write (`set_bounds`) | [`write_recover`] |
//!
//! Tests may still use `.lock().unwrap()` to fail fast.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock a mutex, recovering the guard if a previous holder panicked.
///
/// ```rust
/// use std::sync::Mutex;
/// use videostore::sync::lock_recover;
///
/// let tree_lock = Mutex::new(());
/// let _guard = lock_recover(&tree_lock);
/// ```
#[inline]
pub fn lock_recover<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Like [`lock_recover`] but logs where the poisoned lock was recovered.
#[inline]
pub fn lock_recover_debug<'a, T: ?Sized>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!("mutex poison recovered at: {context}");
        e.into_inner()
    })
}

/// Acquire a read guard, recovering from poison.
#[inline]
pub fn read_recover<T: ?Sized>(rwlock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rwlock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering from poison.
#[inline]
pub fn write_recover<T: ?Sized>(rwlock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rwlock.write().unwrap_or_else(PoisonError::into_inner)
}
