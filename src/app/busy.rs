//! The busy flag gating input while an AI query is outstanding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared view of whether a query is in flight.
///
/// Cloning shares the same flag, so the presentation layer can watch it
/// while the interpreter is borrowed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Mark busy, returning a guard that clears the flag when dropped.
    /// `None` if the flag is already held.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                flag: Arc::clone(&self.0),
            })
    }
}

/// Held for the lifetime of one query. Released on drop, including unwinds.
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
