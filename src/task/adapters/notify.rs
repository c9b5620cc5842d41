//! Task change notifier implementations.

use crate::task::ports::{TaskChange, TaskChangeNotifier};
use tokio::sync::broadcast;

/// Notifier that discards every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTaskChangeNotifier;

impl TaskChangeNotifier for NoopTaskChangeNotifier {
    fn notify(&self, _change: TaskChange) {}
}

/// Fans task changes out to any number of subscribers.
///
/// Subscribers that fall more than `capacity` changes behind observe a lag
/// error from their receiver and should refetch.
#[derive(Debug, Clone)]
pub struct BroadcastTaskChangeNotifier {
    sender: broadcast::Sender<TaskChange>,
}

impl BroadcastTaskChangeNotifier {
    /// Default number of buffered changes per subscriber.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a notifier buffering up to `capacity` changes.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Registers a new subscriber that sees changes published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TaskChange> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastTaskChangeNotifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl TaskChangeNotifier for BroadcastTaskChangeNotifier {
    fn notify(&self, change: TaskChange) {
        let workspace_id = change.workspace_id();
        if self.sender.send(change).is_err() {
            tracing::trace!(%workspace_id, "task change dropped, no subscribers");
        }
    }
}
