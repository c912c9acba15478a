//! Content type inference for generated files.
//!
//! The leading bytes are checked for well known signatures first, then the
//! extension is looked up, and finally plain UTF-8 content is treated as text.

use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::Error;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const SNIFF_LEN: u64 = 512;

const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Infer the content type of the file at `path` by inspecting it.
pub async fn probe_content_type(path: &Path) -> Result<String, Error> {
  let file = File::open(path).await.map_err(|e| {
    if e.kind() == std::io::ErrorKind::NotFound {
      Error::NotFound(path.display().to_string())
    } else {
      Error::Io(e)
    }
  })?;

  let mut head = Vec::new();
  file.take(SNIFF_LEN).read_to_end(&mut head).await?;

  let extension = path
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| e.to_ascii_lowercase());

  Ok(sniff(&head, extension.as_deref()).to_string())
}

fn sniff(head: &[u8], extension: Option<&str>) -> &'static str {
  if head.starts_with(b"%PDF-") {
    return "application/pdf";
  }

  if head.starts_with(b"PK\x03\x04") {
    return match extension {
      Some("xlsx") => XLSX,
      Some("docx") => DOCX,
      _ => "application/zip",
    };
  }

  if let Some(content_type) = extension.and_then(by_extension) {
    return content_type;
  }

  if head.is_empty() || !is_text(head) {
    return DEFAULT_CONTENT_TYPE;
  }

  match head.iter().find(|b| !b.is_ascii_whitespace()) {
    Some(b'{') | Some(b'[') => "application/json",
    _ => "text/plain",
  }
}

fn by_extension(extension: &str) -> Option<&'static str> {
  let content_type = match extension {
    "csv" => "text/csv",
    "json" => "application/json",
    "txt" => "text/plain",
    "html" | "htm" => "text/html",
    "xml" => "application/xml",
    "pdf" => "application/pdf",
    "xlsx" => XLSX,
    "docx" => DOCX,
    "zip" => "application/zip",
    _ => return None,
  };
  Some(content_type)
}

/// UTF-8 without control characters other than whitespace. A multi-byte
/// sequence cut off by the sniff window still counts as text.
fn is_text(head: &[u8]) -> bool {
  let valid = match std::str::from_utf8(head) {
    Ok(text) => text,
    Err(e) if e.error_len().is_none() => match std::str::from_utf8(&head[..e.valid_up_to()]) {
      Ok(text) => text,
      Err(_) => return false,
    },
    Err(_) => return false,
  };

  !valid
    .chars()
    .any(|c| c.is_control() && !c.is_whitespace())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pdf_signature_wins_over_extension() {
    assert_eq!(sniff(b"%PDF-1.7\n...", Some("bin")), "application/pdf");
  }

  #[test]
  fn test_zip_container_uses_extension() {
    assert_eq!(sniff(b"PK\x03\x04rest", Some("xlsx")), XLSX);
    assert_eq!(sniff(b"PK\x03\x04rest", None), "application/zip");
  }

  #[test]
  fn test_extension_table() {
    assert_eq!(sniff(b"code,total\n", Some("csv")), "text/csv");
    assert_eq!(sniff(b"[]", Some("json")), "application/json");
  }

  #[test]
  fn test_text_without_extension() {
    assert_eq!(sniff(b"  {\"a\": 1}", None), "application/json");
    assert_eq!(sniff("plain text ü".as_bytes(), None), "text/plain");
  }

  #[test]
  fn test_truncated_multibyte_is_text() {
    let bytes = "ab\u{00fc}".as_bytes();
    assert!(is_text(&bytes[..bytes.len() - 1]));
  }

  #[test]
  fn test_binary_falls_back_to_default() {
    assert_eq!(sniff(&[0x00, 0x01, 0xff, 0xfe], None), DEFAULT_CONTENT_TYPE);
    assert_eq!(sniff(b"", None), DEFAULT_CONTENT_TYPE);
  }

  #[tokio::test]
  async fn test_probe_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report-abc.CSV");
    std::fs::write(&path, "code\nA-1\n").unwrap();

    assert_eq!(probe_content_type(&path).await.unwrap(), "text/csv");
  }

  #[tokio::test]
  async fn test_probe_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = probe_content_type(&dir.path().join("missing.pdf")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
  }
}
