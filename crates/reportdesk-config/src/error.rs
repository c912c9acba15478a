use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read report configuration {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid report configuration: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("report configuration has an empty {0}")]
  Empty(&'static str),
}
