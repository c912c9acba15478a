//! Report rendering.

use reportdesk_config::ReportFormat;
use reportdesk_search::ResultSet;
use serde_json::Value;

use crate::error::ReportError;

/// Render a result set in the given format.
pub fn render(format: ReportFormat, set: &ResultSet) -> Result<Vec<u8>, ReportError> {
  match format {
    ReportFormat::Csv => render_csv(set),
    ReportFormat::Json => render_json(set),
  }
}

fn render_csv(set: &ResultSet) -> Result<Vec<u8>, ReportError> {
  let mut writer = csv::Writer::from_writer(Vec::new());

  if !set.columns.is_empty() {
    writer.write_record(&set.columns)?;
  }
  for row in &set.rows {
    writer.write_record(row.iter().map(csv_field))?;
  }

  writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))
}

fn csv_field(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn render_json(set: &ResultSet) -> Result<Vec<u8>, ReportError> {
  let records: Vec<Value> = set.records().map(Value::Object).collect();
  Ok(serde_json::to_vec_pretty(&records)?)
}
