//! Reportdesk Artifact
//!
//! This crate provides the transient report file produced by a report run and
//! the sinks it is delivered to.
//!
//! A [`ReportArtifact`] owns its backing file for exactly one request. It is
//! removed when [`ReportArtifact::delete`] is called, and otherwise when the
//! artifact is dropped, so an early return or an unwinding panic cannot leave
//! it behind.
//!
//! The [`Download`] trait is the client side of delivery: it receives the
//! file as a byte stream together with a content type and a file name.

mod artifact;
mod content_type;
mod fs;

pub use artifact::ReportArtifact;
pub use content_type::{DEFAULT_CONTENT_TYPE, probe_content_type};
pub use fs::FsDownload;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// A boxed stream of bytes for artifact data.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

/// Error type for artifact operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The artifact file does not exist.
  #[error("artifact not found: {0}")]
  NotFound(String),

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Destination a generated report is streamed to.
#[async_trait]
pub trait Download: Send + Sync {
  /// Deliver `data` to the client under `filename`.
  async fn save(&self, data: ByteStream, content_type: &str, filename: &str) -> Result<(), Error>;
}
