//! Upload intake
//!
//! Runs a selected file through the upload policy and, when it passes, reads
//! it into a data URI for the preview surface and the caller's continuation.
//!
//! State moves `Idle -> Evaluating -> Accepted | Rejected` and returns to
//! `Evaluating` on the next selection. Selections are never cancelled: if a new
//! file is chosen while an earlier read is still pending, both reads complete,
//! both render a preview and both continuations run. The preview shows
//! whichever read finished last.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::collaborators::{DataUriReader, Notifier, PreviewRenderer, Severity};
use super::file::{CandidateFile, FileSummary};
use super::policy::{self, RejectReason};
use super::IntakeError;

/// Where the intake is in its cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IntakeState {
    Idle,
    Evaluating { display_name: String },
    Accepted { display_name: String },
    Rejected { reason: RejectReason },
}

/// Outcome of a single selection
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeDecision {
    Accepted { file: CandidateFile, data_uri: String },
    Rejected(RejectReason),
}

impl IntakeDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, IntakeDecision::Accepted { .. })
    }

    /// Serializable form, without the data URI payload
    pub fn summary(&self) -> DecisionSummary {
        match self {
            IntakeDecision::Accepted { file, data_uri } => DecisionSummary {
                accepted: true,
                file: Some(file.summary()),
                data_uri_length: Some(data_uri.len()),
                reason: None,
                message: None,
            },
            IntakeDecision::Rejected(reason) => DecisionSummary {
                accepted: false,
                file: None,
                data_uri_length: None,
                reason: Some(*reason),
                message: Some(reason.message().to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionSummary {
    pub accepted: bool,
    pub file: Option<FileSummary>,
    pub data_uri_length: Option<usize>,
    pub reason: Option<RejectReason>,
    pub message: Option<String>,
}

/// Validates and previews image uploads for one upload target
pub struct UploadIntake {
    notifier: Arc<dyn Notifier>,
    renderer: Arc<dyn PreviewRenderer>,
    reader: Arc<dyn DataUriReader>,
    state: Mutex<IntakeState>,
}

impl UploadIntake {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        renderer: Arc<dyn PreviewRenderer>,
        reader: Arc<dyn DataUriReader>,
    ) -> Self {
        Self {
            notifier,
            renderer,
            reader,
            state: Mutex::new(IntakeState::Idle),
        }
    }

    pub fn state(&self) -> IntakeState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_state(&self, next: IntakeState) {
        tracing::debug!(?next, "upload intake transition");
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// Evaluate a file with no continuation
    pub async fn select(&self, file: CandidateFile) -> Result<IntakeDecision, IntakeError> {
        self.select_with(file, |_, _| {}).await
    }

    /// Evaluate a file. On acceptance the preview is rendered first, then
    /// `continuation` receives the original file and its data URI.
    ///
    /// Rejections notify the user and leave any earlier preview in place. A
    /// file that outgrows the limit while being read is rejected as too large.
    pub async fn select_with<F>(
        &self,
        file: CandidateFile,
        continuation: F,
    ) -> Result<IntakeDecision, IntakeError>
    where
        F: FnOnce(&CandidateFile, &str) + Send,
    {
        self.set_state(IntakeState::Evaluating {
            display_name: file.display_name.clone(),
        });

        if let Err(reason) = policy::check(&file) {
            return Ok(self.reject(&file, reason));
        }

        let data_uri = match self.reader.read_as_data_uri(&file).await {
            Ok(uri) => uri,
            Err(IntakeError::TooLarge { .. }) => {
                return Ok(self.reject(&file, RejectReason::TooLarge));
            }
            Err(e) => {
                tracing::error!(file = %file.display_name, error = %e, "failed to read upload");
                self.notifier.notify(&format!("Could not read {}", file.display_name), Severity::Error);
                self.set_state(IntakeState::Idle);
                return Err(e);
            }
        };

        self.renderer.render_preview(&data_uri, &file.display_name);
        continuation(&file, &data_uri);

        self.set_state(IntakeState::Accepted {
            display_name: file.display_name.clone(),
        });
        Ok(IntakeDecision::Accepted { file, data_uri })
    }

    fn reject(&self, file: &CandidateFile, reason: RejectReason) -> IntakeDecision {
        tracing::warn!(
            file = %file.display_name,
            mime_type = %file.mime_type,
            size_bytes = file.size_bytes,
            ?reason,
            "upload rejected"
        );
        self.notifier.notify(reason.message(), Severity::Error);
        self.set_state(IntakeState::Rejected { reason });
        IntakeDecision::Rejected(reason)
    }

    /// Handle a drop of one or more files. Only the first file is evaluated;
    /// an empty drop does nothing.
    pub async fn handle_drop<F>(
        &self,
        files: Vec<CandidateFile>,
        continuation: F,
    ) -> Result<Option<IntakeDecision>, IntakeError>
    where
        F: FnOnce(&CandidateFile, &str) + Send,
    {
        match files.into_iter().next() {
            Some(first) => self.select_with(first, continuation).await.map(Some),
            None => Ok(None),
        }
    }
}
