//! Execute-report action.

use async_trait::async_trait;
use reportdesk_artifact::{Download, ReportArtifact};
use reportdesk_config::ReportConfiguration;
use reportdesk_report::ReportService;
use reportdesk_search::SearchService;
use tracing::{debug, error, info, instrument, warn};

use crate::action::Action;
use crate::error::ActionError;
use crate::events::{ActionEvent, ActionNotifier, NoopNotifier};
use crate::labels::{CONFIRMATION, Labels};
use crate::outcome::ActionOutcome;

/// Runs a stored report and streams the generated file to the client.
///
/// Generic over its collaborators so hosts can plug in their own search
/// backend, report renderer, download sink and dialog notifier.
pub struct ExecuteReportAction<S, R, D, N = NoopNotifier> {
  search: S,
  reports: R,
  download: D,
  labels: Labels,
  notifier: N,
}

impl<S, R, D> ExecuteReportAction<S, R, D, NoopNotifier>
where
  S: SearchService,
  R: ReportService,
  D: Download,
{
  /// Create an action with no-op notifications.
  pub fn new(search: S, reports: R, download: D, labels: Labels) -> Self {
    Self::with_notifier(search, reports, download, labels, NoopNotifier)
  }
}

impl<S, R, D, N> ExecuteReportAction<S, R, D, N>
where
  S: SearchService,
  R: ReportService,
  D: Download,
  N: ActionNotifier,
{
  /// Create an action with a custom notifier.
  pub fn with_notifier(search: S, reports: R, download: D, labels: Labels, notifier: N) -> Self {
    Self {
      search,
      reports,
      download,
      labels,
      notifier,
    }
  }

  /// Execute `report` and deliver the generated file.
  #[instrument(name = "execute_report", skip(self, report), fields(title = %report.title))]
  pub async fn execute(&self, report: &ReportConfiguration) -> ActionOutcome {
    info!("report execution started");
    self.notifier.notify(ActionEvent::Started {
      title: report.title.clone(),
    });

    match self.execute_inner(report).await {
      Ok(filename) => {
        info!(filename = %filename, "report execution completed");
        self.notifier.notify(ActionEvent::Completed {
          title: report.title.clone(),
          filename,
        });
        ActionOutcome::Success
      }
      Err(e) => self.error(report, e),
    }
  }

  async fn execute_inner(&self, report: &ReportConfiguration) -> Result<String, ActionError> {
    let query = &report.search_query;
    let params = self.reports.report_parameters(report).await?;

    debug!(query = %query, params = ?params, "executing query");
    let result = self.search.search(query, &params).await;

    if let Some(error) = result.error() {
      return Err(ActionError::Search(error.to_string()));
    }

    let artifact = self
      .reports
      .report_file(report, &result)
      .await
      .ok_or(ActionError::Generation)?;

    let delivered = self.deliver(report, &artifact).await;

    // The artifact's drop guard covers the paths that never get here.
    if let Err(e) = artifact.delete() {
      warn!(error = %e, "failed to delete report file");
    }

    delivered
  }

  async fn deliver(
    &self,
    report: &ReportConfiguration,
    artifact: &ReportArtifact,
  ) -> Result<String, ActionError> {
    let filename = artifact.download_name(&report.title);

    let sent = async {
      let content_type = artifact.content_type().await?;
      let data = artifact.open().await?;
      self.download.save(data, &content_type, &filename).await
    }
    .await;

    match sent {
      Ok(()) => Ok(filename),
      Err(e) => {
        error!(
          title = %report.title,
          path = %artifact.path().display(),
          error = %e,
          "error reading report file for report {}",
          report.title
        );
        Err(ActionError::Delivery(e))
      }
    }
  }

  fn error(&self, report: &ReportConfiguration, e: ActionError) -> ActionOutcome {
    if let ActionError::Parameters(cause) = &e {
      warn!(error = %cause, "report parameters could not be resolved");
    }

    let message = e.user_message(&self.labels);
    info!(error = %e, "report execution failed");

    self.notifier.notify(ActionEvent::Failed {
      title: report.title.clone(),
      message: message.clone(),
    });

    ActionOutcome::error(message)
  }
}

#[async_trait]
impl<S, R, D, N> Action for ExecuteReportAction<S, R, D, N>
where
  S: SearchService,
  R: ReportService,
  D: Download,
  N: ActionNotifier,
{
  type Input = ReportConfiguration;

  fn confirmation_message(&self, _input: &ReportConfiguration) -> String {
    self.labels.label(CONFIRMATION)
  }

  async fn perform(&self, input: &ReportConfiguration) -> ActionOutcome {
    self.execute(input).await
  }
}
