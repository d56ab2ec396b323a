//! Process-wide loading overlay shared by unrelated operations.

use std::sync::{Arc, Mutex, PoisonError};

/// The actual full-screen indicator.
pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn dismiss(&self);
}

/// Reference-counted handle to the shared indicator.
///
/// The indicator is shown when the first guard is acquired and dismissed when
/// the last one is dropped, so one operation finishing cannot hide an overlay
/// another operation still needs. Clones share the same count.
#[derive(Clone)]
pub struct LoadingOverlay {
    inner: Arc<OverlayInner>,
}

struct OverlayInner {
    indicator: Box<dyn LoadingIndicator>,
    holders: Mutex<usize>,
}

impl LoadingOverlay {
    pub fn new(indicator: impl LoadingIndicator + 'static) -> Self {
        Self {
            inner: Arc::new(OverlayInner {
                indicator: Box::new(indicator),
                holders: Mutex::new(0),
            }),
        }
    }

    #[must_use = "the overlay is dismissed as soon as the guard is dropped"]
    pub fn acquire(&self) -> OverlayGuard {
        let mut holders = self.inner.holders.lock().unwrap_or_else(PoisonError::into_inner);
        if *holders == 0 {
            self.inner.indicator.show();
        }
        *holders += 1;
        OverlayGuard {
            inner: self.inner.clone(),
        }
    }

    pub fn holders(&self) -> usize {
        *self.inner.holders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct OverlayGuard {
    inner: Arc<OverlayInner>,
}

impl Drop for OverlayGuard {
    fn drop(&mut self) {
        let mut holders = self.inner.holders.lock().unwrap_or_else(PoisonError::into_inner);
        *holders = holders.saturating_sub(1);
        if *holders == 0 {
            self.inner.indicator.dismiss();
        }
    }
}
