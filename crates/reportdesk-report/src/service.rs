use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use reportdesk_artifact::ReportArtifact;
use reportdesk_config::ReportConfiguration;
use reportdesk_search::{Parameters, SearchResult};
use tokio::fs;
use tracing::{info, warn};

use crate::ReportService;
use crate::error::ReportError;
use crate::params::resolve_parameters;
use crate::render::render;

/// Report service that writes rendered reports into a work directory.
///
/// Files are named `report-XXXXXX.<ext>` and are owned by the returned
/// [`ReportArtifact`].
pub struct FileReportService {
  work_dir: PathBuf,
}

impl FileReportService {
  pub fn new(work_dir: impl Into<PathBuf>) -> Self {
    Self {
      work_dir: work_dir.into(),
    }
  }

  pub fn work_dir(&self) -> &Path {
    &self.work_dir
  }

  async fn write_report(
    &self,
    report: &ReportConfiguration,
    result: &SearchResult,
  ) -> Result<ReportArtifact, ReportError> {
    let set = match result {
      SearchResult::Rows(set) => set,
      SearchResult::Error(e) => return Err(ReportError::SearchFailed(e.clone())),
    };

    let content = render(report.format, set)?;

    fs::create_dir_all(&self.work_dir).await?;
    let path = tempfile::Builder::new()
      .prefix("report-")
      .suffix(&format!(".{}", report.format.extension()))
      .tempfile_in(&self.work_dir)?
      .into_temp_path();

    // Owned before writing so a failed write still removes the file.
    let artifact = ReportArtifact::new(path);
    fs::write(artifact.path(), &content).await?;

    Ok(artifact)
  }
}

#[async_trait]
impl ReportService for FileReportService {
  async fn report_parameters(
    &self,
    report: &ReportConfiguration,
  ) -> Result<Parameters, ReportError> {
    resolve_parameters(report, Local::now())
  }

  async fn report_file(
    &self,
    report: &ReportConfiguration,
    result: &SearchResult,
  ) -> Option<ReportArtifact> {
    match self.write_report(report, result).await {
      Ok(artifact) => {
        info!(title = %report.title, path = %artifact.path().display(), "report file generated");
        Some(artifact)
      }
      Err(e) => {
        warn!(title = %report.title, error = %e, "failed to generate report file");
        None
      }
    }
  }
}
