//! Liveness token shared between a session and its async completions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flag checked by every completion before it mutates session state
///
/// Cloning shares the flag. Once revoked it never becomes alive again.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl LivenessToken {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Revoke the token; returns whether it was alive before
    pub fn revoke(&self) -> bool {
        self.alive.swap(false, Ordering::AcqRel)
    }
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}
