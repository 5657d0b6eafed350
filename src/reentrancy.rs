//! Debug-only guard against re-entering a table while it runs user code.
//!
//! Bucket scans call `K: Eq` and inserts call `K: Hash`. If either of those
//! reaches back into the same table (through a raw pointer, a `RefCell`
//! smuggled into the key, ...) the table may be observed half-updated,
//! most notably in the middle of a rehash. In debug builds the guard turns
//! that into a panic; release builds compile it away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Busy flag embedded in each table. Public operations hold a
/// [`ScanToken`] for their whole duration.
#[derive(Debug)]
pub struct ScanGuard {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // Tables are single-owner; keep the guard !Sync.
    _not_sync: PhantomData<Cell<()>>,
}

impl ScanGuard {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _not_sync: PhantomData,
        }
    }

    /// Marks the table busy until the returned token is dropped.
    ///
    /// # Panics
    /// In debug builds, panics if the table is already busy.
    #[inline]
    pub fn enter(&self) -> ScanToken<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "chained table re-entered from a key's Eq or Hash implementation"
            );
        }
        ScanToken { guard: self }
    }

    #[cfg(all(test, debug_assertions))]
    fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Default for ScanGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ScanGuard {
    // A clone belongs to a different table and starts idle.
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// RAII token returned by [`ScanGuard::enter`].
pub struct ScanToken<'a> {
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    guard: &'a ScanGuard,
}

impl Drop for ScanToken<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.guard.busy.set(false);
    }
}
