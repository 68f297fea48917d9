//! Status reporting boundary.

/// Sink for human-readable status messages.
///
/// The scheduler emits coarse milestones through this trait (scan start,
/// per-item progress, completion). Delivery is fire-and-forget: the core
/// never assumes the sink buffers, displays, or even looks at the
/// message. Implemented by the CLI progress line; a GUI would provide
/// its own.
///
/// Any `Fn(&str)` closure works as a sink:
///
/// ```
/// use zipsweep_core::StatusSink;
///
/// let sink = |message: &str| eprintln!("{message}");
/// sink.status("Scanning for zip archives...");
/// ```
pub trait StatusSink: Send + Sync {
    /// Receives one status message.
    fn status(&self, message: &str);
}

/// No-op implementation of `StatusSink`.
///
/// Use when no presentation surface is attached.
#[derive(Debug, Default)]
pub struct NoopSink;

impl StatusSink for NoopSink {
    fn status(&self, _message: &str) {}
}

impl<F> StatusSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn status(&self, message: &str) {
        self(message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink_receives_messages() {
        let seen = Mutex::new(Vec::new());
        let sink = |message: &str| {
            seen.lock().unwrap().push(message.to_string());
        };

        sink.status("first");
        sink.status("second");

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen, vec!["first", "second"]);
    }

    #[test]
    fn test_noop_sink_accepts_messages() {
        let sink = NoopSink;
        sink.status("ignored");
    }
}
