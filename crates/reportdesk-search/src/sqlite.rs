use async_trait::async_trait;
use futures::TryStreamExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Column, Executor, Row, Sqlite, Statement, TypeInfo, ValueRef};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::placeholder::bind_named;
use crate::result::{ResultSet, SearchResult};
use crate::{Parameters, SearchService};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// SQLite-backed search service.
pub struct SqliteSearchService {
  pool: SqlitePool,
  max_rows: Option<usize>,
}

impl SqliteSearchService {
  /// Create a new search service with the given connection pool.
  pub fn new(pool: SqlitePool) -> Self {
    Self {
      pool,
      max_rows: None,
    }
  }

  /// Stop reading after `max_rows` rows.
  pub fn with_max_rows(mut self, max_rows: usize) -> Self {
    self.max_rows = Some(max_rows);
    self
  }

  async fn run(&self, query: &str, parameters: &Parameters) -> Result<ResultSet, SearchError> {
    let named = bind_named(query)?;

    let mut sql_query = sqlx::query(&named.sql);
    for name in &named.names {
      let value = parameters
        .get(name)
        .ok_or_else(|| SearchError::MissingParameter(name.clone()))?;
      sql_query = bind_value(sql_query, value);
    }

    let mut stream = sql_query.fetch(&self.pool);
    let mut columns = Vec::new();
    let mut rows = Vec::new();

    while let Some(row) = stream.try_next().await? {
      if let Some(max_rows) = self.max_rows
        && rows.len() >= max_rows
      {
        warn!(max_rows, "search result truncated");
        break;
      }
      if columns.is_empty() {
        columns = row.columns().iter().map(|c| c.name().to_string()).collect();
      }
      rows.push(decode_row(&row)?);
    }
    // Releases the connection before the statement is prepared below.
    drop(stream);

    // No rows to read names from, so take them from the statement.
    if columns.is_empty() {
      columns = self.column_names(&named.sql).await?;
    }

    Ok(ResultSet::new(columns, rows))
  }

  async fn column_names(&self, sql: &str) -> Result<Vec<String>, sqlx::Error> {
    let statement = (&self.pool).prepare(sql).await?;
    Ok(
      statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect(),
    )
  }
}

#[async_trait]
impl SearchService for SqliteSearchService {
  async fn search(&self, query: &str, parameters: &Parameters) -> SearchResult {
    match self.run(query, parameters).await {
      Ok(set) => {
        debug!(rows = set.len(), "search completed");
        SearchResult::Rows(set)
      }
      Err(e) => {
        warn!(error = %e, "search failed");
        SearchResult::failed(e.to_string())
      }
    }
  }
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
  match value {
    Value::Null => query.bind(None::<String>),
    Value::Bool(b) => query.bind(*b),
    Value::Number(n) => match n.as_i64() {
      Some(i) => query.bind(i),
      None => query.bind(n.as_f64().unwrap_or_default()),
    },
    Value::String(s) => query.bind(s.clone()),
    other => query.bind(other.to_string()),
  }
}

/// Decode a row by the storage class of each value.
fn decode_row(row: &SqliteRow) -> Result<Vec<Value>, sqlx::Error> {
  let mut values = Vec::with_capacity(row.len());

  for index in 0..row.len() {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
      values.push(Value::Null);
      continue;
    }
    let storage_class = raw.type_info().name().to_string();

    let value = match storage_class.as_str() {
      "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
      "REAL" => Value::from(row.try_get_unchecked::<f64, _>(index)?),
      "BLOB" => {
        let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
      }
      _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
    };
    values.push(value);
  }

  Ok(values)
}
