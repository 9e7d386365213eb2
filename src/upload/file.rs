//! Candidate files
//!
//! Descriptor of a file offered for upload. Type and size are known up front;
//! the content is only read once the file has passed policy checks.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::IntakeError;

/// Where a candidate file's bytes come from
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// Bytes already held in memory
    Bytes(Vec<u8>),
    /// A file on disk, read when the data URI is produced
    Path(PathBuf),
}

/// A file selected or dropped by the user
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    pub mime_type: String,
    pub size_bytes: u64,
    pub display_name: String,
    pub source: FileSource,
}

impl CandidateFile {
    /// In-memory file; size is taken from the buffer
    pub fn from_bytes(display_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            size_bytes: bytes.len() as u64,
            display_name: display_name.to_string(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Describe a file on disk without reading its content
    pub async fn from_path(path: &Path) -> Result<Self, IntakeError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| IntakeError::Io { path: path.to_path_buf(), source })?;

        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            mime_type: mime_from_path(path).to_string(),
            size_bytes: metadata.len(),
            display_name,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Serializable view without the content
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            display_name: self.display_name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.size_bytes,
        }
    }
}

/// File metadata for responses and logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub display_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Infer a mime type from a file extension
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("lunch.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("lunch.png")), "image/png");
        assert_eq!(mime_from_path(Path::new("scan.webp")), "image/webp");
        assert_eq!(mime_from_path(Path::new("menu.pdf")), "application/pdf");
        assert_eq!(mime_from_path(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn test_from_bytes_takes_size_from_buffer() {
        let file = CandidateFile::from_bytes("a.png", "image/png", vec![0u8; 1024]);
        assert_eq!(file.size_bytes, 1024);
        assert_eq!(file.summary().display_name, "a.png");
    }

    #[tokio::test]
    async fn test_from_path_reads_metadata_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breakfast.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let file = CandidateFile::from_path(&path).await.unwrap();
        assert_eq!(file.display_name, "breakfast.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.size_bytes, 3);
        assert_eq!(file.source, FileSource::Path(path));
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = CandidateFile::from_path(Path::new("/definitely/not/here.png")).await;
        assert!(matches!(result, Err(IntakeError::Io { .. })));
    }
}
