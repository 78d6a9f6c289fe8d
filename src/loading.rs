//! Advisory loading flags for the stores

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// RAII guard holding a store's loading flag for the duration of a call.
///
/// The flag is advisory: callers use it to disable re-entrant actions (a
/// submit button, for instance). It does not serialize concurrent calls.
pub(crate) struct LoadingGuard(Arc<AtomicBool>);

impl LoadingGuard {
    pub(crate) fn hold(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
