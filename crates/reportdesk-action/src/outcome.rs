//! Action outcome.

use serde::{Deserialize, Serialize};

/// Terminal result of one action invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionOutcome {
  Success,
  Error { message: String },
}

impl ActionOutcome {
  pub fn error(message: impl Into<String>) -> Self {
    ActionOutcome::Error {
      message: message.into(),
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, ActionOutcome::Success)
  }

  /// Result message, present for errors only.
  pub fn message(&self) -> Option<&str> {
    match self {
      ActionOutcome::Success => None,
      ActionOutcome::Error { message } => Some(message),
    }
  }
}
