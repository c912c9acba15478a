use std::path::{Path, PathBuf};

use futures::StreamExt;
use tempfile::TempPath;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::content_type::probe_content_type;
use crate::{ByteStream, Error};

/// A generated report file, scoped to a single request.
///
/// The backing file is removed by [`ReportArtifact::delete`] or, failing that,
/// when the artifact is dropped.
#[derive(Debug)]
pub struct ReportArtifact {
  path: TempPath,
}

impl ReportArtifact {
  pub fn new(path: TempPath) -> Self {
    Self { path }
  }

  /// Take ownership of an existing file. It will be deleted with the artifact.
  pub fn from_path(path: impl Into<PathBuf>) -> Self {
    Self {
      path: TempPath::from_path(path),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Extension of the backing file, without the leading dot.
  pub fn extension(&self) -> Option<&str> {
    self.path.extension().and_then(|e| e.to_str())
  }

  /// File name offered to the client: `{title}.{extension}`, or just the
  /// title when the backing file has no extension.
  pub fn download_name(&self, title: &str) -> String {
    match self.extension() {
      Some(extension) if !extension.is_empty() => format!("{}.{}", title, extension),
      _ => title.to_string(),
    }
  }

  /// Content type inferred from the file's leading bytes and extension.
  pub async fn content_type(&self) -> Result<String, Error> {
    probe_content_type(self.path()).await
  }

  /// Open the backing file as a byte stream.
  pub async fn open(&self) -> Result<ByteStream, Error> {
    let file = File::open(self.path()).await.map_err(|e| self.io_error(e))?;
    let stream = ReaderStream::new(file).map(|r| r.map_err(Error::Io));
    Ok(Box::pin(stream))
  }

  /// Remove the backing file.
  pub fn delete(self) -> Result<(), Error> {
    let display = self.path.display().to_string();
    self.path.close().map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        Error::NotFound(display)
      } else {
        Error::Io(e)
      }
    })
  }

  fn io_error(&self, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
      Error::NotFound(self.path.display().to_string())
    } else {
      Error::Io(e)
    }
  }
}
