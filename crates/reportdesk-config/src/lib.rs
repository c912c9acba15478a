//! Reportdesk Config
//!
//! This crate contains the serializable report configuration types for reportdesk.
//! A report configuration is a stored, named query definition: a title, the
//! search query text, the parameters bound into that query, and the format the
//! generated file is written in.
//!
//! Configuration can be loaded from:
//! - JSON files (via CLI with `reportdesk run report.json`)
//! - Any other JSON source (via [`ReportConfiguration::from_json`])
//!
//! The executor treats these values as read-only. Parameter templates are
//! resolved by the report service before the query runs.

mod error;
mod format;
mod parameter;
mod report;

pub use error::ConfigError;
pub use format::ReportFormat;
pub use parameter::{ParameterDef, ParameterKind, ParameterTemplate};
pub use report::ReportConfiguration;
