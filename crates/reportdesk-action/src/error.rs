//! Action errors.

use reportdesk_report::ReportError;

use crate::labels::{FILE_READ_ERROR, Labels, REPORT_GENERATE_ERROR, SEARCH_ERROR};

/// Errors that end a report execution.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
  /// Report parameters could not be resolved.
  #[error("failed to resolve report parameters: {0}")]
  Parameters(#[from] ReportError),

  /// The search collaborator reported a failure.
  #[error("search failed: {0}")]
  Search(String),

  /// No report file was generated.
  #[error("report file could not be generated")]
  Generation,

  /// The report file could not be read or streamed to the client.
  #[error("failed to deliver report file: {0}")]
  Delivery(#[from] reportdesk_artifact::Error),
}

impl ActionError {
  /// Localization key of the message shown for this error.
  pub fn label_key(&self) -> &'static str {
    match self {
      ActionError::Search(_) => SEARCH_ERROR,
      ActionError::Parameters(_) | ActionError::Generation => REPORT_GENERATE_ERROR,
      ActionError::Delivery(_) => FILE_READ_ERROR,
    }
  }

  /// Message shown to the operator.
  pub fn user_message(&self, labels: &Labels) -> String {
    match self {
      ActionError::Search(error) => labels.format(SEARCH_ERROR, &[error.as_str()]),
      other => labels.label(other.label_key()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_search_message_embeds_error() {
    let error = ActionError::Search("syntax error near SELECT".to_string());
    let message = error.user_message(&Labels::default());
    assert!(message.contains("syntax error near SELECT"));
  }

  #[test]
  fn test_parameter_error_uses_generation_label() {
    let error = ActionError::Parameters(ReportError::SearchFailed("x".to_string()));
    assert_eq!(error.label_key(), REPORT_GENERATE_ERROR);
    assert_eq!(
      error.user_message(&Labels::default()),
      Labels::default().label(REPORT_GENERATE_ERROR)
    );
  }

  #[test]
  fn test_delivery_uses_file_read_label() {
    let error = ActionError::Delivery(reportdesk_artifact::Error::NotFound("r.csv".to_string()));
    assert_eq!(error.label_key(), FILE_READ_ERROR);
  }
}
