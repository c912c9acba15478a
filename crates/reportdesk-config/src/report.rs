use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::format::ReportFormat;
use crate::parameter::ParameterDef;

/// Stored definition of a query-backed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfiguration {
  /// Human readable title, also used as the download file name.
  pub title: String,
  /// Query text in the data source's query language.
  pub search_query: String,
  /// Parameters bound into the query, keyed by placeholder name.
  #[serde(default)]
  pub parameters: BTreeMap<String, ParameterDef>,
  #[serde(default)]
  pub format: ReportFormat,
}

impl ReportConfiguration {
  pub fn new(title: impl Into<String>, search_query: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      search_query: search_query.into(),
      parameters: BTreeMap::new(),
      format: ReportFormat::default(),
    }
  }

  pub fn with_parameter(mut self, name: impl Into<String>, def: impl Into<ParameterDef>) -> Self {
    self.parameters.insert(name.into(), def.into());
    self
  }

  pub fn with_format(mut self, format: ReportFormat) -> Self {
    self.format = format;
    self
  }

  /// Parse and validate a configuration from JSON text.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    let report: ReportConfiguration = serde_json::from_str(content)?;
    report.validate()?;
    Ok(report)
  }

  /// Read a configuration from a JSON file.
  pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
      .await
      .map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;
    Self::from_json(&content)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.title.trim().is_empty() {
      return Err(ConfigError::Empty("title"));
    }
    if self.search_query.trim().is_empty() {
      return Err(ConfigError::Empty("search_query"));
    }
    Ok(())
  }
}
