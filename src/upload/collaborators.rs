//! Upload collaborators
//!
//! Narrow interfaces the intake talks to: user notifications, the preview
//! surface and the asynchronous content reader.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;

use super::file::{CandidateFile, FileSource};
use super::policy::MAX_UPLOAD_BYTES;
use super::IntakeError;

/// Notification severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Parse a severity name; unknown names are `Info`
    pub fn from_str(s: &str) -> Self {
        match s {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn color_token(&self) -> &'static str {
        match self {
            Severity::Info => "var(--secondary-blue)",
            Severity::Success => "var(--success-green)",
            Severity::Warning => "var(--warning-orange)",
            Severity::Error => "var(--error-red)",
        }
    }
}

/// Fire-and-forget user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Surface showing the most recently accepted image. Last call wins.
pub trait PreviewRenderer: Send + Sync {
    fn render_preview(&self, data_uri: &str, label: &str);
}

/// Single-shot conversion of file content to a base64 data URI
#[async_trait]
pub trait DataUriReader: Send + Sync {
    async fn read_as_data_uri(&self, file: &CandidateFile) -> Result<String, IntakeError>;
}

/// Notifier that writes to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(severity = severity.as_str(), "{}", message)
            }
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
        }
    }
}

/// Encode bytes as `data:<mime>;base64,<payload>`
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Reader for in-memory and on-disk sources.
///
/// On-disk reads stop one byte past `MAX_UPLOAD_BYTES`, so a file that grows
/// after the policy check fails with `IntakeError::TooLarge`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64DataUriReader;

#[async_trait]
impl DataUriReader for Base64DataUriReader {
    async fn read_as_data_uri(&self, file: &CandidateFile) -> Result<String, IntakeError> {
        match &file.source {
            FileSource::Bytes(bytes) => Ok(encode_data_uri(&file.mime_type, bytes)),
            FileSource::Path(path) => {
                let io_err = |source: std::io::Error| IntakeError::Io { path: path.clone(), source };
                let handle = tokio::fs::File::open(path).await.map_err(io_err)?;

                let mut bytes = Vec::new();
                handle
                    .take(MAX_UPLOAD_BYTES + 1)
                    .read_to_end(&mut bytes)
                    .await
                    .map_err(io_err)?;
                if bytes.len() as u64 > MAX_UPLOAD_BYTES {
                    return Err(IntakeError::TooLarge {
                        path: path.clone(),
                        limit: MAX_UPLOAD_BYTES,
                    });
                }
                Ok(encode_data_uri(&file.mime_type, &bytes))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_data_uri() {
        assert_eq!(encode_data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
        assert_eq!(encode_data_uri("image/jpeg", b""), "data:image/jpeg;base64,");
    }

    #[test]
    fn test_severity_parse_and_tokens() {
        assert_eq!(Severity::from_str("error"), Severity::Error);
        assert_eq!(Severity::from_str("bogus"), Severity::Info);
        assert_eq!(Severity::Warning.color_token(), "var(--warning-orange)");
        assert_eq!(Severity::from_str("bogus").color_token(), "var(--secondary-blue)");
    }

    #[tokio::test]
    async fn test_reader_in_memory() {
        let file = CandidateFile::from_bytes("x.webp", "image/webp", b"abc".to_vec());
        let uri = Base64DataUriReader.read_as_data_uri(&file).await.unwrap();
        assert_eq!(uri, "data:image/webp;base64,YWJj");
    }

    #[tokio::test]
    async fn test_reader_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.png");
        std::fs::write(&path, b"abc").unwrap();

        let file = CandidateFile::from_path(&path).await.unwrap();
        let uri = Base64DataUriReader.read_as_data_uri(&file).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn test_reader_reports_vanished_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.png");
        std::fs::write(&path, b"abc").unwrap();
        let file = CandidateFile::from_path(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let result = Base64DataUriReader.read_as_data_uri(&file).await;
        assert!(matches!(result, Err(IntakeError::Io { .. })));
    }

    #[tokio::test]
    async fn test_reader_stops_at_upload_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growing.png");
        std::fs::write(&path, b"abc").unwrap();
        let file = CandidateFile::from_path(&path).await.unwrap();
        std::fs::write(&path, vec![0u8; MAX_UPLOAD_BYTES as usize + 1]).unwrap();

        let result = Base64DataUriReader.read_as_data_uri(&file).await;
        assert!(matches!(
            result,
            Err(IntakeError::TooLarge { limit, .. }) if limit == MAX_UPLOAD_BYTES
        ));
    }

    #[tokio::test]
    async fn test_reader_accepts_file_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.png");
        std::fs::write(&path, vec![0u8; MAX_UPLOAD_BYTES as usize]).unwrap();
        let file = CandidateFile::from_path(&path).await.unwrap();

        let uri = Base64DataUriReader.read_as_data_uri(&file).await.unwrap();
        assert!(uri.starts_with("data:image/png;base64,AAAA"));
    }
}
