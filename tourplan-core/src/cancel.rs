//! Cooperative cancellation for long-running searches.
//!
//! A [`CancellationToken`] combines a shared flag with an optional deadline.
//! Solvers poll [`CancellationToken::should_stop`] from their search loops;
//! nothing is interrupted pre-emptively.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared stop signal with an optional deadline.
///
/// Clones share the same flag. [`CancellationToken::child_with_budget`]
/// derives a token that stops on the parent's flag or on its own, earlier,
/// deadline.
///
/// # Examples
/// ```
/// use tourplan_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
/// assert!(!observer.should_stop());
/// token.cancel();
/// assert!(observer.should_stop());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// A token that never stops unless cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that stops once `deadline` has passed.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Some(deadline),
        }
    }

    /// Derive a token sharing this token's flag whose deadline is the earlier
    /// of the parent's and `now + budget`.
    #[must_use]
    pub fn child_with_budget(&self, budget: Duration) -> Self {
        let own = Instant::now().checked_add(budget);
        let deadline = match (self.deadline, own) {
            (Some(parent), Some(child)) => Some(parent.min(child)),
            (parent, child) => parent.or(child),
        };
        Self {
            cancelled: Arc::clone(&self.cancelled),
            deadline,
        }
    }

    /// Request that every holder of this flag stops.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether [`CancellationToken::cancel`] was called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Deadline after which the token reports stop, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a search should give up now.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
