use thiserror::Error;

/// Errors raised while rewriting named placeholders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceholderError {
  #[error("unnamed placeholder at position {position}, use ?name instead")]
  Unnamed { position: usize },
}

/// Errors that can occur while running a search.
#[derive(Debug, Error)]
pub enum SearchError {
  #[error(transparent)]
  Placeholder(#[from] PlaceholderError),

  #[error("missing value for parameter '{0}'")]
  MissingParameter(String),

  #[error(transparent)]
  Database(#[from] sqlx::Error),
}
