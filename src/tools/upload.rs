//! Upload MCP tools
//!
//! Meal photo intake for files on the local disk. The service keeps the latest
//! preview and a short notification history in place of a visual surface.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use crate::upload::{
    CandidateFile, DecisionSummary, Notifier, PreviewRenderer, Severity, TracingNotifier,
    UploadIntake,
};

/// Notifications retained for get_upload_preview
const NOTIFICATION_HISTORY: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub color_token: &'static str,
    pub timestamp: String,
}

/// Notifier that logs and remembers recent notifications
#[derive(Default)]
pub struct NotificationLog {
    recent: Mutex<VecDeque<Notification>>,
}

impl NotificationLog {
    pub fn recent(&self) -> Vec<Notification> {
        self.recent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, message: &str, severity: Severity) {
        TracingNotifier.notify(message, severity);

        let mut recent = self.recent.lock().unwrap_or_else(|e| e.into_inner());
        if recent.len() == NOTIFICATION_HISTORY {
            recent.pop_front();
        }
        recent.push_back(Notification {
            message: message.to_string(),
            severity,
            color_token: severity.color_token(),
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        });
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub label: String,
    pub data_uri: String,
    pub rendered_at: String,
}

/// Holds the most recently rendered preview
#[derive(Default)]
pub struct PreviewSlot {
    current: Mutex<Option<Preview>>,
}

impl PreviewSlot {
    pub fn current(&self) -> Option<Preview> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl PreviewRenderer for PreviewSlot {
    fn render_preview(&self, data_uri: &str, label: &str) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(Preview {
            label: label.to_string(),
            data_uri: data_uri.to_string(),
            rendered_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        });
    }
}

/// Response for validate_upload
#[derive(Debug, Serialize)]
pub struct ValidateUploadResponse {
    pub file_path: String,
    #[serde(flatten)]
    pub decision: DecisionSummary,
}

/// Response for get_upload_preview
#[derive(Debug, Serialize)]
pub struct UploadPreviewResponse {
    pub preview: Option<Preview>,
    pub notifications: Vec<Notification>,
}

// ============================================================================
// Tool Functions
// ============================================================================

/// Run a file on disk through the upload intake
pub async fn validate_upload(
    intake: &UploadIntake,
    file_path: &str,
) -> Result<ValidateUploadResponse, String> {
    let file = CandidateFile::from_path(Path::new(file_path))
        .await
        .map_err(|e| e.to_string())?;

    let decision = intake
        .select_with(file, |f, uri| {
            tracing::info!(file = %f.display_name, data_uri_length = uri.len(), "upload accepted");
        })
        .await
        .map_err(|e| e.to_string())?;

    Ok(ValidateUploadResponse {
        file_path: file_path.to_string(),
        decision: decision.summary(),
    })
}

/// Latest preview and recent notifications
pub fn get_upload_preview(slot: &PreviewSlot, log: &NotificationLog) -> UploadPreviewResponse {
    UploadPreviewResponse {
        preview: slot.current(),
        notifications: log.recent(),
    }
}
