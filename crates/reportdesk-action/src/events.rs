//! Action events and notifiers.
//!
//! Events are emitted while a report executes so the host can show progress
//! and, on failure, the error dialog. A [`ActionEvent::Failed`] carries the
//! same message that is returned in the outcome.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during report execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionEvent {
  /// Execution has started.
  Started { title: String },

  /// The report was delivered to the client.
  Completed { title: String, filename: String },

  /// Execution failed. Hosts show `message` in a modal error dialog.
  Failed { title: String, message: String },
}

/// Trait for receiving action events.
pub trait ActionNotifier: Send + Sync {
  fn notify(&self, event: ActionEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ActionNotifier for NoopNotifier {
  fn notify(&self, _event: ActionEvent) {}
}

/// A notifier that sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<ActionEvent>,
}

impl ChannelNotifier {
  /// Create a notifier and the receiver its events arrive on.
  pub fn new() -> (Self, mpsc::UnboundedReceiver<ActionEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self { sender }, receiver)
  }
}

impl ActionNotifier for ChannelNotifier {
  fn notify(&self, event: ActionEvent) {
    // A dropped receiver means nobody is listening anymore.
    let _ = self.sender.send(event);
  }
}

impl<N: ActionNotifier + ?Sized> ActionNotifier for std::sync::Arc<N> {
  fn notify(&self, event: ActionEvent) {
    (**self).notify(event)
  }
}
