//! Reportdesk Search
//!
//! This crate provides the search collaborator used by report execution.
//! A search takes the report's query text plus resolved parameters and produces
//! either a result set or an error description.
//!
//! The [`SearchService`] trait is the seam. [`SqliteSearchService`] is the
//! bundled implementation; it accepts `?name` placeholders and binds them from
//! the parameter map.

mod error;
mod placeholder;
mod result;
mod sqlite;

use std::collections::BTreeMap;

pub use error::{PlaceholderError, SearchError};
pub use placeholder::{NamedQuery, bind_named};
pub use result::{ResultSet, SearchResult};
pub use sqlite::SqliteSearchService;

use async_trait::async_trait;

/// Resolved query parameters, keyed by placeholder name.
pub type Parameters = BTreeMap<String, serde_json::Value>;

/// Executes parameterized queries against a data source.
///
/// Implementations never fail the call itself: any failure is reported
/// through [`SearchResult::Error`] so callers can show it to the user.
#[async_trait]
pub trait SearchService: Send + Sync {
  async fn search(&self, query: &str, parameters: &Parameters) -> SearchResult;
}
