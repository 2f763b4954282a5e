//! Relay error types
//!
//! Callers only ever see the fixed message of an [`ErrorCode`]. The detail
//! carried by [`RelayError`] is meant for server-side logs.

use thiserror::Error;

/// Caller-visible failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing, malformed or wrong credentials on the write path
    Unauthorized,
    /// The liveness check could not list the bucket
    BackendUnreachable,
    /// The backend rejected or failed the write
    UploadFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::BackendUnreachable => "BackendUnreachable",
            Self::UploadFailed => "UploadFailed",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::BackendUnreachable => 400,
            Self::UploadFailed => 500,
        }
    }

    /// Body sent to the caller. Never includes backend detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::BackendUnreachable => "Error accessing Bucket",
            Self::UploadFailed => "could not upload",
        }
    }
}

/// Relay failure with internal detail
#[derive(Debug, Error)]
#[error("{}: {detail}", .code.as_str())]
pub struct RelayError {
    pub code: ErrorCode,
    pub detail: String,
}

impl RelayError {
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn backend_unreachable(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::BackendUnreachable, detail)
    }

    pub fn upload_failed(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::UploadFailed, detail)
    }

    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    pub fn public_message(&self) -> &'static str {
        self.code.public_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Unauthorized.http_status(), 401);
        assert_eq!(ErrorCode::BackendUnreachable.http_status(), 400);
        assert_eq!(ErrorCode::UploadFailed.http_status(), 500);
    }

    #[test]
    fn test_public_message_hides_detail() {
        let error = RelayError::upload_failed("NoSuchBucket: The specified bucket does not exist");

        assert_eq!(error.public_message(), "could not upload");
        assert!(error.to_string().contains("NoSuchBucket"));
        assert!(error.to_string().starts_with("UploadFailed: "));
    }
}
