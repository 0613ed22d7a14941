//! Moving file content in and out: export, import and the clipboard

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::record::FileRecord;

/// Mime type of exported files
pub const EXPORT_MIME_TYPE: &str = "text/plain";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} has no file name")]
    NoFileName(PathBuf),
}

/// Bytes ready for a "save as" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    /// Suggested file name
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            file_name: record.name.clone(),
            mime_type: EXPORT_MIME_TYPE,
            bytes: record.code.as_bytes().to_vec(),
        }
    }

    /// Write the payload to a chosen destination
    pub fn write_to(&self, path: &Path) -> Result<(), TransferError> {
        fs::write(path, &self.bytes).map_err(|source| TransferError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Exported {} to {}", self.file_name, path.display());
        Ok(())
    }
}

/// Decode uploaded bytes as UTF-8 text, replacing invalid sequences
pub fn decode_upload(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read a picked file into `(name, content)` for uploading
pub fn import_file(path: &Path) -> Result<(String, String), TransferError> {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| TransferError::NoFileName(path.to_path_buf()))?;
    let bytes = fs::read(path).map_err(|source| TransferError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((name, decode_upload(&bytes)))
}

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Somewhere text can be copied to
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard. Opened lazily and reopened after a failure.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError("not initialized".to_string()));
        };

        if let Err(e) = clipboard.set_text(text) {
            self.inner = None;
            return Err(ClipboardError(e.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::FileId;

    #[test]
    fn test_export_payload_matches_record() {
        let record = FileRecord::new(FileId(1), "hello.rs", "fn main() {}\n");
        let payload = ExportPayload::from_record(&record);
        assert_eq!(payload.file_name, "hello.rs");
        assert_eq!(payload.mime_type, "text/plain");
        assert_eq!(payload.bytes, b"fn main() {}\n");
    }

    #[test]
    fn test_export_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let record = FileRecord::new(FileId(1), "out.txt", "line\n");
        let path = dir.path().join("out.txt");
        ExportPayload::from_record(&record).write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "line\n");
    }

    #[test]
    fn test_decode_upload() {
        assert_eq!(decode_upload(b"\xEF\xBB\xBFprint(1)"), "print(1)");
        assert_eq!(decode_upload(b"ok\xFF"), "ok\u{FFFD}");
        assert_eq!(decode_upload(b""), "");
    }

    #[test]
    fn test_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.sql");
        fs::write(&path, "SELECT 1;").unwrap();

        let (name, content) = import_file(&path).unwrap();
        assert_eq!(name, "query.sql");
        assert_eq!(content, "SELECT 1;");

        assert!(import_file(&dir.path().join("missing.txt")).is_err());
    }
}
