//! Localized messages.
//!
//! Messages are looked up by key. Patterns use `{0}`-style arguments and the
//! usual quoting rules: `''` is a literal quote and text between single quotes
//! is copied without argument substitution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const CONFIRMATION: &str = "executereport.confirmation";
pub const SEARCH_ERROR: &str = "executereport.errors.search";
pub const REPORT_GENERATE_ERROR: &str = "executereport.errors.generation";
pub const FILE_READ_ERROR: &str = "executereport.errors.fileread";

const DEFAULTS: [(&str, &str); 4] = [
  (
    CONFIRMATION,
    "Execute this report now? The generated file is downloaded when it is ready.",
  ),
  (SEARCH_ERROR, "The report query failed: {0}"),
  (REPORT_GENERATE_ERROR, "The report file could not be generated."),
  (FILE_READ_ERROR, "The generated report file could not be read."),
];

/// Message catalog keyed by label key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels {
  entries: HashMap<String, String>,
}

impl Default for Labels {
  fn default() -> Self {
    Self {
      entries: DEFAULTS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    }
  }
}

impl Labels {
  /// Parse a JSON object of overrides and merge it over the defaults.
  pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
    let overrides: HashMap<String, String> = serde_json::from_str(content)?;
    let mut labels = Self::default();
    labels.entries.extend(overrides);
    Ok(labels)
  }

  pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.entries.insert(key.into(), value.into());
    self
  }

  /// Look up a label. Unknown keys render as the key itself.
  pub fn label(&self, key: &str) -> String {
    self
      .entries
      .get(key)
      .cloned()
      .unwrap_or_else(|| key.to_string())
  }

  /// Look up a label and substitute `args` into it.
  pub fn format(&self, key: &str, args: &[&str]) -> String {
    format_message(&self.label(key), args)
  }
}

/// Substitute `{n}` arguments into `pattern`.
///
/// Placeholders without a matching argument are kept as written.
pub fn format_message(pattern: &str, args: &[&str]) -> String {
  let mut out = String::with_capacity(pattern.len());
  let mut chars = pattern.chars().peekable();
  let mut quoted = false;

  while let Some(c) = chars.next() {
    match c {
      '\'' if chars.peek() == Some(&'\'') => {
        chars.next();
        out.push('\'');
      }
      '\'' => quoted = !quoted,
      '{' if !quoted => {
        let mut index = String::new();
        let mut closed = false;
        for next in chars.by_ref() {
          if next == '}' {
            closed = true;
            break;
          }
          index.push(next);
        }

        match index.trim().parse::<usize>().ok().and_then(|i| args.get(i)) {
          Some(arg) if closed => out.push_str(arg),
          _ => {
            out.push('{');
            out.push_str(&index);
            if closed {
              out.push('}');
            }
          }
        }
      }
      c => out.push(c),
    }
  }

  out
}
