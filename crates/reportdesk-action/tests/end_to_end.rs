//! End-to-end runs against SQLite, the file report service and a download directory.

use reportdesk_action::{ActionOutcome, ExecuteReportAction, Labels};
use reportdesk_artifact::FsDownload;
use reportdesk_config::{ParameterDef, ParameterKind, ReportConfiguration, ReportFormat};
use reportdesk_report::FileReportService;
use reportdesk_search::SqliteSearchService;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn orders_pool() -> SqlitePool {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("failed to open in-memory database");

  sqlx::query(r#"CREATE TABLE "Order" (code TEXT NOT NULL, status TEXT NOT NULL, total REAL NOT NULL)"#)
    .execute(&pool)
    .await
    .expect("failed to create table");

  for i in 0..10 {
    sqlx::query(r#"INSERT INTO "Order" (code, status, total) VALUES (?, ?, ?)"#)
      .bind(format!("O-{:02}", i))
      .bind(if i % 2 == 0 { "COMPLETED" } else { "CANCELLED" })
      .bind(10.0 * i as f64)
      .execute(&pool)
      .await
      .expect("failed to insert order");
  }

  pool
}

fn entries(dir: &std::path::Path) -> Vec<String> {
  match std::fs::read_dir(dir) {
    Ok(entries) => entries
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect(),
    Err(_) => Vec::new(),
  }
}

#[tokio::test]
async fn test_orders_report_is_downloaded() {
  let dir = tempfile::tempdir().unwrap();
  let work_dir = dir.path().join("work");
  let downloads = dir.path().join("downloads");

  let action = ExecuteReportAction::new(
    SqliteSearchService::new(orders_pool().await),
    FileReportService::new(&work_dir),
    FsDownload::new(&downloads),
    Labels::default(),
  );
  let report = ReportConfiguration::new(
    "Orders2024",
    r#"SELECT code, total FROM "Order" WHERE status = ?status AND total >= ?min ORDER BY code"#,
  )
  .with_parameter("status", "COMPLETED")
  .with_parameter(
    "min",
    ParameterDef::Typed {
      value: "40".to_string(),
      kind: ParameterKind::Number,
    },
  );

  let outcome = action.execute(&report).await;

  assert_eq!(outcome, ActionOutcome::Success);
  assert_eq!(entries(&downloads), vec!["Orders2024.csv".to_string()]);
  assert!(entries(&work_dir).is_empty(), "work dir should be empty");

  let content = std::fs::read_to_string(downloads.join("Orders2024.csv")).unwrap();
  assert_eq!(content, "code,total\nO-04,40.0\nO-06,60.0\nO-08,80.0\n");
}

#[tokio::test]
async fn test_json_report_is_downloaded() {
  let dir = tempfile::tempdir().unwrap();
  let downloads = dir.path().join("downloads");

  let action = ExecuteReportAction::new(
    SqliteSearchService::new(orders_pool().await),
    FileReportService::new(dir.path().join("work")),
    FsDownload::new(&downloads),
    Labels::default(),
  );
  let report = ReportConfiguration::new("Count", r#"SELECT COUNT(*) AS orders FROM "Order""#)
    .with_format(ReportFormat::Json);

  assert!(action.execute(&report).await.is_success());

  let parsed: serde_json::Value =
    serde_json::from_slice(&std::fs::read(downloads.join("Count.json")).unwrap()).unwrap();
  assert_eq!(parsed, serde_json::json!([{"orders": 10}]));
}

#[tokio::test]
async fn test_query_syntax_error_creates_no_file() {
  let dir = tempfile::tempdir().unwrap();
  let work_dir = dir.path().join("work");
  let downloads = dir.path().join("downloads");

  let action = ExecuteReportAction::new(
    SqliteSearchService::new(orders_pool().await),
    FileReportService::new(&work_dir),
    FsDownload::new(&downloads),
    Labels::default(),
  );
  let report = ReportConfiguration::new("Orders2024", "SELECT * FROM Order");

  let outcome = action.execute(&report).await;

  let message = outcome.message().expect("outcome should be an error");
  assert!(message.contains("syntax error"), "unexpected message: {}", message);
  assert!(entries(&work_dir).is_empty());
  assert!(entries(&downloads).is_empty());
}

#[tokio::test]
async fn test_report_with_no_matches_keeps_header() {
  let dir = tempfile::tempdir().unwrap();
  let downloads = dir.path().join("downloads");

  let action = ExecuteReportAction::new(
    SqliteSearchService::new(orders_pool().await),
    FileReportService::new(dir.path().join("work")),
    FsDownload::new(&downloads),
    Labels::default(),
  );
  let report = ReportConfiguration::new(
    "Empty",
    r#"SELECT code, total FROM "Order" WHERE status = ?status"#,
  )
  .with_parameter("status", "RETURNED");

  assert_eq!(action.execute(&report).await, ActionOutcome::Success);

  let content = std::fs::read_to_string(downloads.join("Empty.csv")).unwrap();
  assert_eq!(content, "code,total\n");
}
