//! Screen lifecycle: liveness and close, shared with the background worker.
//!
//! The liveness flag doubles as the worker's abort token. Destroying the screen
//! (e.g. Ctrl-C) stops an in-flight download, and the flow checks liveness
//! before acting on the worker's completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Screen {
    destroyed: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// False once `destroy` was called.
    pub fn is_alive(&self) -> bool {
        !self.destroyed.load(Ordering::SeqCst)
    }

    /// Tear the screen down from outside the flow. Pending work is aborted and
    /// its completion dropped.
    pub fn destroy(&self) {
        if !self.destroyed.swap(true, Ordering::SeqCst) {
            tracing::debug!("screen destroyed");
        }
    }

    /// Abort token for the worker: set when the screen is destroyed.
    pub fn abort_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.destroyed)
    }

    /// The flow finished and closed the screen itself.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
