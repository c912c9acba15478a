//! Query parameter definitions.
//!
//! Every parameter value is a template string that gets resolved by minijinja
//! before the query runs. The resolved string is then parsed into the declared
//! [`ParameterKind`].
//!
//! # Examples
//!
//! ```json
//! {
//!   "status": "COMPLETED",
//!   "since": "{{ year }}-01-01",
//!   "min_total": { "value": "100", "type": "number" },
//!   "limit": { "value": "50", "type": "integer" }
//! }
//! ```
//!
//! A plain string is shorthand for `{ "value": "...", "type": "string" }`.

use serde::{Deserialize, Serialize};

/// A parameter value is a template string that gets resolved at execution time.
pub type ParameterTemplate = String;

/// Type a resolved parameter is coerced to before it is bound into the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
  #[default]
  String,
  Integer,
  Number,
  Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterDef {
  Plain(ParameterTemplate),
  Typed {
    value: ParameterTemplate,
    #[serde(rename = "type", default)]
    kind: ParameterKind,
  },
}

impl ParameterDef {
  pub fn template(&self) -> &str {
    match self {
      ParameterDef::Plain(value) => value,
      ParameterDef::Typed { value, .. } => value,
    }
  }

  pub fn kind(&self) -> ParameterKind {
    match self {
      ParameterDef::Plain(_) => ParameterKind::String,
      ParameterDef::Typed { kind, .. } => *kind,
    }
  }
}

impl From<&str> for ParameterDef {
  fn from(value: &str) -> Self {
    ParameterDef::Plain(value.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_parameter_is_string() {
    let def: ParameterDef = serde_json::from_str(r#""COMPLETED""#).unwrap();
    assert_eq!(def.template(), "COMPLETED");
    assert_eq!(def.kind(), ParameterKind::String);
  }

  #[test]
  fn test_typed_parameter() {
    let def: ParameterDef = serde_json::from_str(r#"{"value": "50", "type": "integer"}"#).unwrap();
    assert_eq!(def.template(), "50");
    assert_eq!(def.kind(), ParameterKind::Integer);
  }

  #[test]
  fn test_typed_parameter_defaults_to_string() {
    let def: ParameterDef = serde_json::from_str(r#"{"value": "{{ today }}"}"#).unwrap();
    assert_eq!(def.kind(), ParameterKind::String);
  }
}
