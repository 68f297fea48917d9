//! Cooperative cancellation signal.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Process-wide cancellation flag, observed cooperatively.
///
/// Clones share the same underlying flag. External callers set it once;
/// it is never cleared mid-run. The scheduler and long-running
/// extraction loops check it at well-defined points; in-flight
/// single-entry writes are not interrupted.
///
/// # Examples
///
/// ```
/// use zipsweep_core::CancelFlag;
///
/// let cancel = CancelFlag::new();
/// let observer = cancel.clone();
/// assert!(!observer.is_cancelled());
///
/// cancel.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a new, unset cancellation flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        let cancel = CancelFlag::new();
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let cancel = CancelFlag::new();
        let observer = cancel.clone();

        cancel.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn test_observed_across_threads() {
        let cancel = CancelFlag::new();
        let worker_flag = cancel.clone();

        cancel.cancel();
        let handle = std::thread::spawn(move || worker_flag.is_cancelled());
        assert!(handle.join().unwrap_or(false));
    }
}
