use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{ByteStream, Download, Error};

/// Filesystem download sink.
///
/// Each delivered file is written to `{dir}/{filename}`. The directory is
/// created on first use. Data is streamed into a hidden temp file next to the
/// target and only renamed into place once every chunk has been written, so a
/// failed download never leaves a truncated file behind. Path separators in the file name are replaced so a
/// report title can never escape the directory.
pub struct FsDownload {
  dir: PathBuf,
}

impl FsDownload {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Path a file delivered under `filename` ends up at.
  pub fn target_path(&self, filename: &str) -> PathBuf {
    self.dir.join(sanitize(filename))
  }
}

#[async_trait]
impl Download for FsDownload {
  async fn save(&self, data: ByteStream, content_type: &str, filename: &str) -> Result<(), Error> {
    let path = self.target_path(filename);
    debug!(path = %path.display(), content_type, "saving download");

    fs::create_dir_all(&self.dir).await?;

    // Removed on drop unless persisted.
    let partial = tempfile::Builder::new()
      .prefix(".download-")
      .tempfile_in(&self.dir)?
      .into_temp_path();

    let mut file = File::create(&partial).await?;
    let mut stream = std::pin::pin!(data);

    while let Some(chunk) = stream.next().await {
      let bytes = chunk?;
      file.write_all(&bytes).await?;
    }

    file.flush().await?;
    drop(file);

    partial.persist(&path).map_err(|e| Error::Io(e.error))?;
    Ok(())
  }
}

fn sanitize(filename: &str) -> String {
  let name: String = filename
    .chars()
    .map(|c| match c {
      '/' | '\\' | '\0' => '_',
      c => c,
    })
    .collect();

  match name.as_str() {
    "" | "." | ".." => "_".to_string(),
    _ => name,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bytes::Bytes;

  fn stream_of(chunks: &[&'static [u8]]) -> ByteStream {
    let items: Vec<Result<Bytes, Error>> =
      chunks.iter().map(|c| Ok(Bytes::from_static(c))).collect();
    Box::pin(futures::stream::iter(items))
  }

  #[test]
  fn test_sanitize() {
    assert_eq!(sanitize("Orders2024.csv"), "Orders2024.csv");
    assert_eq!(sanitize("../etc/passwd"), ".._etc_passwd");
    assert_eq!(sanitize(".."), "_");
  }

  #[tokio::test]
  async fn test_save_writes_all_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let download = FsDownload::new(dir.path().join("downloads"));

    download
      .save(stream_of(&[b"code,", b"total\n"]), "text/csv", "Orders2024.csv")
      .await
      .expect("save should succeed");

    let content = std::fs::read(download.target_path("Orders2024.csv")).unwrap();
    assert_eq!(content, b"code,total\n");
  }

  #[tokio::test]
  async fn test_save_propagates_stream_error() {
    let dir = tempfile::tempdir().unwrap();
    let download = FsDownload::new(dir.path());

    let items: Vec<Result<Bytes, Error>> = vec![
      Ok(Bytes::from_static(b"partial")),
      Err(Error::Io(std::io::Error::other("truncated read"))),
    ];
    let result = download
      .save(Box::pin(futures::stream::iter(items)), "text/csv", "r.csv")
      .await;

    assert!(matches!(result, Err(Error::Io(_))));
    assert!(!download.target_path("r.csv").exists());
    let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
  }

  #[tokio::test]
  async fn test_failed_save_keeps_previous_download() {
    let dir = tempfile::tempdir().unwrap();
    let download = FsDownload::new(dir.path());
    std::fs::write(download.target_path("r.csv"), b"code\nA-1\n").unwrap();

    let items: Vec<Result<Bytes, Error>> = vec![
      Ok(Bytes::from_static(b"code\n")),
      Err(Error::Io(std::io::Error::other("truncated read"))),
    ];
    let result = download
      .save(Box::pin(futures::stream::iter(items)), "text/csv", "r.csv")
      .await;

    assert!(result.is_err());
    let content = std::fs::read(download.target_path("r.csv")).unwrap();
    assert_eq!(content, b"code\nA-1\n");
  }

  #[tokio::test]
  async fn test_save_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let download = FsDownload::new(dir.path());
    std::fs::write(download.target_path("r.csv"), b"stale contents").unwrap();

    download
      .save(stream_of(&[b"fresh"]), "text/csv", "r.csv")
      .await
      .expect("save should succeed");

    let content = std::fs::read(download.target_path("r.csv")).unwrap();
    assert_eq!(content, b"fresh");
  }
}
