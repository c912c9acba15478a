use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use reportdesk_action::{
  ActionEvent, ActionNotifier, ActionOutcome, Confirm, ConfirmationGate, ExecuteReportAction,
  Labels,
};
use reportdesk_artifact::FsDownload;
use reportdesk_config::ReportConfiguration;
use reportdesk_report::FileReportService;
use reportdesk_search::SqliteSearchService;

/// Reportdesk - run stored reports and download the generated file
#[derive(Parser)]
#[command(name = "reportdesk")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.reportdesk)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Execute a report and download the generated file
  Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
  /// Path to the report configuration (JSON)
  report_file: PathBuf,

  /// SQLite database to query (default: <data-dir>/reportdesk.db)
  #[arg(long)]
  database: Option<PathBuf>,

  /// Directory the report is downloaded to
  #[arg(long, default_value = ".")]
  output_dir: PathBuf,

  /// Directory for temporary report files (default: <data-dir>/tmp)
  #[arg(long)]
  work_dir: Option<PathBuf>,

  /// JSON file overriding the built-in messages
  #[arg(long)]
  labels: Option<PathBuf>,

  /// Stop reading query results after this many rows
  #[arg(long)]
  max_rows: Option<usize>,

  /// Run without asking for confirmation
  #[arg(long, short = 'y')]
  yes: bool,
}

fn main() -> Result<ExitCode> {
  init_tracing();
  let cli = Cli::parse();

  let data_dir = cli.data_dir.unwrap_or_else(|| {
    dirs::home_dir()
      .expect("could not determine home directory")
      .join(".reportdesk")
  });

  match cli.command {
    Some(Commands::Run(args)) => run_report(args, data_dir),
    None => {
      println!("reportdesk - use --help to see available commands");
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(io::stderr)
    .init();
}

fn run_report(args: RunArgs, data_dir: PathBuf) -> Result<ExitCode> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_report_async(args, data_dir).await })
}

async fn run_report_async(args: RunArgs, data_dir: PathBuf) -> Result<ExitCode> {
  let report = ReportConfiguration::load(&args.report_file)
    .await
    .with_context(|| format!("failed to load report: {}", args.report_file.display()))?;

  eprintln!("Loaded report: {}", report.title);

  let labels = match &args.labels {
    Some(path) => {
      let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read labels file: {}", path.display()))?;
      Labels::from_json(&content)
        .with_context(|| format!("failed to parse labels file: {}", path.display()))?
    }
    None => Labels::default(),
  };

  // Open the database read-only; reports never write.
  let database = args
    .database
    .unwrap_or_else(|| data_dir.join("reportdesk.db"));
  let options = SqliteConnectOptions::new()
    .filename(&database)
    .read_only(true);
  let pool = SqlitePool::connect_with(options)
    .await
    .with_context(|| format!("failed to open database: {}", database.display()))?;

  let mut search = SqliteSearchService::new(pool);
  if let Some(max_rows) = args.max_rows {
    search = search.with_max_rows(max_rows);
  }

  let work_dir = args.work_dir.unwrap_or_else(|| data_dir.join("tmp"));
  let action = ExecuteReportAction::with_notifier(
    search,
    FileReportService::new(work_dir),
    FsDownload::new(&args.output_dir),
    labels,
    ConsoleNotifier {
      download: FsDownload::new(&args.output_dir),
    },
  );

  let mut gate = ConfirmationGate::new(PromptConfirm {
    assume_yes: args.yes,
  });

  match gate.run(&action, &report).await {
    None => {
      eprintln!("Cancelled");
      Ok(ExitCode::from(2))
    }
    Some(ActionOutcome::Success) => Ok(ExitCode::SUCCESS),
    Some(ActionOutcome::Error { .. }) => Ok(ExitCode::FAILURE),
  }
}

/// Renders action events on the terminal. Failures are shown as an error box.
struct ConsoleNotifier {
  download: FsDownload,
}

impl ActionNotifier for ConsoleNotifier {
  fn notify(&self, event: ActionEvent) {
    match event {
      ActionEvent::Started { title } => eprintln!("Executing report: {}", title),
      ActionEvent::Completed { filename, .. } => {
        eprintln!("Downloaded: {}", self.download.target_path(&filename).display());
      }
      ActionEvent::Failed { message, .. } => {
        eprintln!();
        eprintln!("Error");
        eprintln!("  {}", message);
        eprintln!("  [ OK ]");
      }
    }
  }
}

/// Asks for confirmation on the terminal.
struct PromptConfirm {
  assume_yes: bool,
}

#[async_trait]
impl Confirm for PromptConfirm {
  async fn confirm(&self, message: &str) -> bool {
    if self.assume_yes {
      return true;
    }

    if !io::stdin().is_terminal() {
      warn!("stdin is not a terminal, pass --yes to run without confirmation");
      return false;
    }

    let message = message.to_string();
    tokio::task::spawn_blocking(move || prompt(&message))
      .await
      .unwrap_or(false)
  }
}

fn prompt(message: &str) -> bool {
  let mut stderr = io::stderr();
  let _ = write!(stderr, "{} [y/N] ", message);
  let _ = stderr.flush();

  let mut answer = String::new();
  if io::stdin().lock().read_line(&mut answer).is_err() {
    return false;
  }

  matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
