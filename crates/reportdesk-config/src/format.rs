use serde::{Deserialize, Serialize};

/// Output format of a generated report file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
  #[default]
  Csv,
  Json,
}

impl ReportFormat {
  /// File extension used for files of this format.
  pub fn extension(&self) -> &'static str {
    match self {
      ReportFormat::Csv => "csv",
      ReportFormat::Json => "json",
    }
  }
}
