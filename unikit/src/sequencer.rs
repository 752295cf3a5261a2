//! Monotonic counter service backing every unique value derivation.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, OnceLock};

/// Strictly increasing counter shared by all generators drawing from it.
///
/// Tests need values that are unique for a whole run rather than random per
/// execution, so the root of uniqueness is a plain atomic increment: every
/// read bumps the counter and returns the new value. The counter starts at
/// zero, produces only positive values, never resets within a process, and
/// wraps with native overflow semantics (irrelevant at test-run scale).
///
/// The sequencer is an ordinary value with an explicit lifecycle: construct
/// one and share it by reference (`Arc`) to isolate counter state, or use
/// [`global_sequencer`] for the process-wide default that backs the
/// module-level `unique_*` functions.
#[derive(Debug, Default)]
pub struct Sequencer {
    counter: AtomicI64,
}

impl Sequencer {
    /// Create a new sequencer starting at zero
    pub const fn new() -> Self {
        Self {
            counter: AtomicI64::new(0),
        }
    }

    /// Increment the counter and return the new value; always greater than
    /// zero, strictly increasing across sequential calls, lock-free under
    /// concurrent callers
    pub fn next_long(&self) -> i64 {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Last value handed out (zero if none yet)
    pub fn current(&self) -> i64 {
        self.counter.load(Ordering::Relaxed)
    }
}

/// Process-wide default sequencer instance
static GLOBAL_SEQUENCER: OnceLock<Arc<Sequencer>> = OnceLock::new();

/// Get the shared process-wide sequencer, initializing it on first use
pub fn global_sequencer() -> Arc<Sequencer> {
    GLOBAL_SEQUENCER
        .get_or_init(|| Arc::new(Sequencer::new()))
        .clone()
}
