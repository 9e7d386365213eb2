//! Image upload intake
//!
//! Policy checks, data URI conversion and preview hand-off for meal photos.

pub mod collaborators;
pub mod file;
pub mod intake;
pub mod policy;

use std::path::PathBuf;

use thiserror::Error;

pub use collaborators::{
    encode_data_uri, Base64DataUriReader, DataUriReader, Notifier, PreviewRenderer, Severity,
    TracingNotifier,
};
pub use file::{mime_from_path, CandidateFile, FileSource, FileSummary};
pub use intake::{DecisionSummary, IntakeDecision, IntakeState, UploadIntake};
pub use policy::{RejectReason, ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};

/// Failures while obtaining a file's content
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file grew past the upload limit after it was checked
    #[error("{} is larger than {limit} bytes", .path.display())]
    TooLarge { path: PathBuf, limit: u64 },
}
