//! Per-invocation diagnostic log.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// A message logged during one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// The logged text. Non-string values are logged as JSON.
    pub message: String,
}

/// Append-only log scoped to a single invocation.
///
/// Clones share the same sequence, so the host closures bound into a script
/// and the host itself see one ordered log. Entries are handed to the caller
/// in one batch once the invocation has finished.
#[derive(Debug, Clone, Default)]
pub struct LogChannel {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogChannel {
    /// Creates an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the log.
    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "widget_script", %message, "Script log");
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(LogEntry { message });
    }

    /// Removes and returns every entry logged so far, in order.
    pub fn drain(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_order() {
        let channel = LogChannel::new();
        channel.log("first");
        channel.log(String::from("second"));

        let messages: Vec<_> = channel.drain().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_clones_share_entries() {
        let channel = LogChannel::new();
        let clone = channel.clone();
        clone.log("from clone");

        assert_eq!(channel.drain(), vec![LogEntry { message: "from clone".into() }]);
    }

    #[test]
    fn test_drain_empties_channel() {
        let channel = LogChannel::new();
        channel.log("once");
        assert_eq!(channel.drain().len(), 1);
        assert!(channel.drain().is_empty());
    }

    #[test]
    fn test_separate_channels_are_isolated() {
        let a = LogChannel::new();
        let b = LogChannel::new();
        a.log("only a");

        assert!(b.drain().is_empty());
        assert_eq!(a.drain().len(), 1);
    }
}
