//! Parameter resolution using minijinja templates.
//!
//! Every parameter value is rendered as a template against a small context,
//! then parsed into the parameter's declared kind.
//!
//! # Context
//!
//! | name    | value                               |
//! |---------|-------------------------------------|
//! | `title` | the report title                    |
//! | `today` | current local date, `YYYY-MM-DD`    |
//! | `now`   | current local time, RFC 3339        |
//! | `year`  | current year                        |
//! | `month` | current month, `1..=12`             |
//!
//! ```json
//! { "since": "{{ year }}-01-01", "label": "{{ title | upper }}" }
//! ```

use chrono::{DateTime, Datelike, Local};
use minijinja::{Environment, Value};
use reportdesk_config::{ParameterKind, ReportConfiguration};
use reportdesk_search::Parameters;
use serde_json::json;

use crate::error::ReportError;

/// Resolve all parameters of `report` as of `now`.
pub fn resolve_parameters(
  report: &ReportConfiguration,
  now: DateTime<Local>,
) -> Result<Parameters, ReportError> {
  let env = Environment::new();

  let context = json!({
    "title": report.title,
    "today": now.format("%Y-%m-%d").to_string(),
    "now": now.to_rfc3339(),
    "year": now.year(),
    "month": now.month(),
  });
  let ctx_value = Value::from_serialize(&context);

  let mut resolved = Parameters::new();

  for (name, def) in &report.parameters {
    let rendered =
      env
        .render_str(def.template(), ctx_value.clone())
        .map_err(|e| ReportError::ParameterResolution {
          name: name.clone(),
          message: e.to_string(),
        })?;
    resolved.insert(name.clone(), coerce_parameter(name, &rendered, def.kind())?);
  }

  Ok(resolved)
}

/// Parse a rendered parameter into its declared kind.
pub fn coerce_parameter(
  name: &str,
  rendered: &str,
  kind: ParameterKind,
) -> Result<serde_json::Value, ReportError> {
  let type_error = |expected: &'static str| ReportError::ParameterType {
    name: name.to_string(),
    expected,
    value: rendered.to_string(),
  };
  let trimmed = rendered.trim();

  match kind {
    ParameterKind::String => Ok(serde_json::Value::String(rendered.to_string())),
    ParameterKind::Integer => trimmed
      .parse::<i64>()
      .map(serde_json::Value::from)
      .map_err(|_| type_error("integer")),
    ParameterKind::Number => {
      if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(serde_json::Value::from(i));
      }
      trimmed
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(serde_json::Value::Number)
        .ok_or_else(|| type_error("number"))
    }
    ParameterKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
      "true" | "1" | "yes" => Ok(serde_json::Value::Bool(true)),
      "false" | "0" | "no" => Ok(serde_json::Value::Bool(false)),
      _ => Err(type_error("boolean")),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use reportdesk_config::ParameterDef;

  fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()
  }

  #[test]
  fn test_resolve_templates_against_context() {
    let report = ReportConfiguration::new("Orders2024", "SELECT 1")
      .with_parameter("since", "{{ year }}-01-01")
      .with_parameter("day", "{{ today }}")
      .with_parameter("label", "{{ title | upper }}")
      .with_parameter("status", "COMPLETED");

    let params = resolve_parameters(&report, fixed_now()).unwrap();

    assert_eq!(params["since"], "2024-01-01");
    assert_eq!(params["day"], "2024-03-05");
    assert_eq!(params["label"], "ORDERS2024");
    assert_eq!(params["status"], "COMPLETED");
  }

  #[test]
  fn test_resolve_typed_parameters() {
    let report = ReportConfiguration::new("t", "SELECT 1")
      .with_parameter(
        "month",
        ParameterDef::Typed {
          value: "{{ month }}".to_string(),
          kind: ParameterKind::Integer,
        },
      )
      .with_parameter(
        "active",
        ParameterDef::Typed {
          value: "yes".to_string(),
          kind: ParameterKind::Boolean,
        },
      );

    let params = resolve_parameters(&report, fixed_now()).unwrap();

    assert_eq!(params["month"], 3);
    assert_eq!(params["active"], true);
  }

  #[test]
  fn test_invalid_template_fails() {
    let report = ReportConfiguration::new("t", "SELECT 1").with_parameter("broken", "{{ title");

    let err = resolve_parameters(&report, fixed_now()).unwrap_err();
    assert!(matches!(err, ReportError::ParameterResolution { ref name, .. } if name == "broken"));
  }

  #[test]
  fn test_coerce_number() {
    assert_eq!(coerce_parameter("n", "42", ParameterKind::Number).unwrap(), 42);
    assert_eq!(coerce_parameter("n", " 2.5 ", ParameterKind::Number).unwrap(), 2.5);
    assert!(coerce_parameter("n", "NaN", ParameterKind::Number).is_err());
  }

  #[test]
  fn test_coerce_type_error() {
    let err = coerce_parameter("limit", "ten", ParameterKind::Integer).unwrap_err();
    assert_eq!(err.to_string(), "parameter 'limit' expected integer, got 'ten'");
  }

  #[test]
  fn test_string_keeps_whitespace() {
    assert_eq!(coerce_parameter("s", " a ", ParameterKind::String).unwrap(), " a ");
  }
}
