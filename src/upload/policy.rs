//! Upload policy
//!
//! Which files may be previewed: a small image allow-list and a 5 MiB ceiling.

use serde::{Deserialize, Serialize};

use super::file::CandidateFile;

/// Accepted mime types
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Largest accepted file, inclusive
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Why a file was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InvalidType,
    TooLarge,
}

impl RejectReason {
    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::InvalidType => "Please select a valid image file (JPEG, PNG, WebP)",
            RejectReason::TooLarge => "File size should be less than 5MB",
        }
    }
}

/// Check type then size. The first failing check wins.
pub fn check(file: &CandidateFile) -> Result<(), RejectReason> {
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(RejectReason::InvalidType);
    }
    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(RejectReason::TooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::file::FileSource;

    fn descriptor(mime: &str, size: u64) -> CandidateFile {
        CandidateFile {
            mime_type: mime.to_string(),
            size_bytes: size,
            display_name: "f".to_string(),
            source: FileSource::Bytes(Vec::new()),
        }
    }

    #[test]
    fn test_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert_eq!(check(&descriptor(mime, 10)), Ok(()));
        }
        assert_eq!(check(&descriptor("application/pdf", 10)), Err(RejectReason::InvalidType));
        assert_eq!(check(&descriptor("image/gif", 10)), Err(RejectReason::InvalidType));
        assert_eq!(check(&descriptor("IMAGE/PNG", 10)), Err(RejectReason::InvalidType));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert_eq!(check(&descriptor("image/png", MAX_UPLOAD_BYTES)), Ok(()));
        assert_eq!(
            check(&descriptor("image/png", MAX_UPLOAD_BYTES + 1)),
            Err(RejectReason::TooLarge)
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        assert_eq!(
            check(&descriptor("application/pdf", MAX_UPLOAD_BYTES + 1)),
            Err(RejectReason::InvalidType)
        );
    }
}
