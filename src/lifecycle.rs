//! Lifetime of per-frame loops.
//!
//! Every frame-driven loop in the crate (the model spin, the particle drift,
//! the stat counters) owns a [`LoopToken`]. The loop checks the token once per
//! iteration and stops for good once it has been cancelled, so tearing the
//! page or the window down halts every loop deterministically.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared cancellation flag for a frame loop.
///
/// Clones observe the same flag: cancel through any of them and all of them
/// report [`is_cancelled`](Self::is_cancelled).
#[derive(Clone, Debug, Default)]
pub struct LoopToken {
    cancelled: Arc<AtomicBool>,
}

impl LoopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            log::debug!("frame loop cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// A token that is cancelled whenever `self` or `parent` is.
    pub fn child_of(parent: &LoopToken) -> ChildToken {
        ChildToken {
            parent: parent.clone(),
            own: LoopToken::new(),
        }
    }
}

/// Token bound to both its own flag and a parent's.
#[derive(Clone, Debug)]
pub struct ChildToken {
    parent: LoopToken,
    own: LoopToken,
}

impl ChildToken {
    pub fn cancel(&self) {
        self.own.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.own.is_cancelled() || self.parent.is_cancelled()
    }

    /// Runs one iteration of the loop unless the token has been cancelled.
    /// Returns whether `frame` ran.
    pub fn run_frame<F: FnOnce()>(&self, frame: F) -> bool {
        if self.is_cancelled() {
            return false;
        }
        frame();
        true
    }
}

/// Whether a `pagehide` ends the page's loops. A page that is `persisted`
/// goes into the back/forward cache and resumes with its loops intact.
pub fn page_hide_ends_loops(persisted: bool) -> bool {
    !persisted
}
