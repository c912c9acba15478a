//! Search results.

use serde::{Deserialize, Serialize};

/// Rows returned by a successful search, with their column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
  pub columns: Vec<String>,
  pub rows: Vec<Vec<serde_json::Value>>,
}

impl ResultSet {
  pub fn new(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
    Self { columns, rows }
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Rows as JSON objects keyed by column name.
  pub fn records(&self) -> impl Iterator<Item = serde_json::Map<String, serde_json::Value>> + '_ {
    self.rows.iter().map(|row| {
      self
        .columns
        .iter()
        .cloned()
        .zip(row.iter().cloned())
        .collect()
    })
  }
}

/// Outcome of a single search: rows or an error description, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchResult {
  Rows(ResultSet),
  Error(String),
}

impl SearchResult {
  pub fn failed(error: impl Into<String>) -> Self {
    SearchResult::Error(error.into())
  }

  pub fn has_error(&self) -> bool {
    matches!(self, SearchResult::Error(_))
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      SearchResult::Error(error) => Some(error),
      SearchResult::Rows(_) => None,
    }
  }

  pub fn result_set(&self) -> Option<&ResultSet> {
    match self {
      SearchResult::Rows(set) => Some(set),
      SearchResult::Error(_) => None,
    }
  }
}

impl From<ResultSet> for SearchResult {
  fn from(set: ResultSet) -> Self {
    SearchResult::Rows(set)
  }
}
