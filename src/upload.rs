//! Client-side gate in front of `/upload_csv`.
//!
//! A file must pass the extension and size checks before any bytes cross
//! the wire. Both checks are pure so the widget can run them before it
//! bothers reading the file.

use crate::api::{ApiClient, ApiError};
use crate::types::{UploadCandidate, UploadComplete};
use thiserror::Error;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please select a valid CSV file")]
    InvalidFormat,

    #[error("File too large. Maximum size: 10MB")]
    TooLarge,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Extension first, then size. A misnamed oversized file reports the
/// extension problem. The check is case-sensitive: `.CSV` is rejected.
pub fn validate(file_name: &str, size_bytes: u64) -> Result<(), UploadError> {
    if !file_name.ends_with(".csv") {
        return Err(UploadError::InvalidFormat);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

/// Validates, ships the file, and pairs the candidate with whatever column
/// list the server sent back. No columns are invented on the client.
pub async fn run_upload(
    api: &ApiClient,
    candidate: UploadCandidate,
) -> Result<UploadComplete, UploadError> {
    validate(&candidate.file_name, candidate.size_bytes)?;
    let accepted = api
        .upload_csv(&candidate.file_name, candidate.raw_content.clone().into_bytes())
        .await?;
    Ok(UploadComplete {
        candidate,
        columns: accepted.columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_csv_at_the_size_limit() {
        assert!(validate("data.csv", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn rejects_non_csv_extensions() {
        let err = validate("data.txt", 10).unwrap_err();
        assert!(matches!(err, UploadError::InvalidFormat));
        assert_eq!(err.to_string(), "Please select a valid CSV file");
    }

    #[test]
    fn extension_check_is_case_sensitive() {
        assert!(matches!(
            validate("DATA.CSV", 10),
            Err(UploadError::InvalidFormat)
        ));
    }

    #[test]
    fn rejects_oversized_files() {
        let err = validate("data.csv", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge));
        assert_eq!(err.to_string(), "File too large. Maximum size: 10MB");
    }

    #[test]
    fn extension_outranks_size() {
        assert!(matches!(
            validate("huge.txt", MAX_UPLOAD_BYTES + 1),
            Err(UploadError::InvalidFormat)
        ));
    }

    #[test]
    fn api_errors_keep_their_own_message() {
        let err = UploadError::from(ApiError::Rejected {
            message: "No file part in the request".to_string(),
        });
        assert_eq!(err.to_string(), "No file part in the request");
    }
}
