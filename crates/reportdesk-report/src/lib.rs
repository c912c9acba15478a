//! Reportdesk Report
//!
//! This crate provides the report collaborator used by report execution. It
//! has two jobs:
//!
//! 1. Resolve a report's parameter templates into typed query parameters.
//! 2. Render a search result into a file that can be handed to the client.
//!
//! # Flow
//!
//! ```text
//! ReportConfiguration ──report_parameters──▶ Parameters ──▶ SearchService
//!                                                              │
//!                     ReportArtifact ◀──report_file── SearchResult
//! ```
//!
//! [`FileReportService`] implements both steps, writing CSV or JSON files into
//! a work directory.

mod error;
mod params;
mod render;
mod service;

pub use error::ReportError;
pub use params::{coerce_parameter, resolve_parameters};
pub use render::render;
pub use service::FileReportService;

use async_trait::async_trait;
use reportdesk_artifact::ReportArtifact;
use reportdesk_config::ReportConfiguration;
use reportdesk_search::{Parameters, SearchResult};

/// Resolves report parameters and materializes report files.
#[async_trait]
pub trait ReportService: Send + Sync {
  /// Resolve the parameters bound into the report's query.
  async fn report_parameters(
    &self,
    report: &ReportConfiguration,
  ) -> Result<Parameters, ReportError>;

  /// Render a search result into a report file.
  ///
  /// Returns `None` when no file could be produced.
  async fn report_file(
    &self,
    report: &ReportConfiguration,
    result: &SearchResult,
  ) -> Option<ReportArtifact>;
}
