//! Cooperative cancellation.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;

/// Error returned when a pass stops at a checkpoint after cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("generation pass cancelled")]
pub struct Cancelled;

/// A shared flag checked at every traversal step.
///
/// Clones share the same flag, so a token handed to another thread can
/// cancel a pass running on this one.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Fail with [`Cancelled`] if cancellation has been requested.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Whether an error is (or wraps) a cancellation.
pub fn is_cancelled(err: &eyre::Report) -> bool {
    err.downcast_ref::<Cancelled>().is_some()
}
