// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mapping from domain errors to HTTP responses.
//
// Bodies are plain text.  Which 500 prefix is used depends on the operation
// that failed, so handlers pick a constructor rather than relying on `From`.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use directprint_core::DirectPrintError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Printing failed: {0}")]
    PrintFailed(String),

    #[error("Failed to get printers: {0}")]
    ListingFailed(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

impl ApiError {
    /// Error raised while persisting or dispatching an upload.
    pub fn printing(err: DirectPrintError) -> Self {
        match err {
            DirectPrintError::Validation(message) => Self::BadRequest(message),
            other => Self::PrintFailed(other.to_string()),
        }
    }

    /// Error raised while listing host printers.
    pub fn listing(err: DirectPrintError) -> Self {
        Self::ListingFailed(err.to_string())
    }
}

impl From<DirectPrintError> for ApiError {
    fn from(err: DirectPrintError) -> Self {
        match err {
            DirectPrintError::Validation(message) => Self::BadRequest(message),
            DirectPrintError::JobNotFound(_) => Self::NotFound,
            e @ DirectPrintError::InvalidTransition { .. } => Self::Conflict(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

fn log_error(err: &ApiError) {
    match err {
        ApiError::BadRequest(message) => warn!("rejected request: {message}"),
        ApiError::NotFound => {}
        ApiError::Conflict(message) => warn!("conflicting update: {message}"),
        ApiError::Multipart(e) => warn!("unreadable upload: {e}"),
        ApiError::PrintFailed(_) | ApiError::ListingFailed(_) | ApiError::Internal(_) => {
            error!("{err}")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_error(&self);

        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::Conflict(_) => StatusCode::CONFLICT,
            // Keeps axum's own status, e.g. 413 when the body limit is hit.
            Self::Multipart(e) => return e.into_response(),
            Self::PrintFailed(_) | Self::ListingFailed(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use directprint_core::types::{JobId, JobStatus};

    use super::*;

    #[test]
    fn missing_renderer_becomes_a_print_failure() {
        let err = ApiError::printing(DirectPrintError::ExternalToolMissing {
            path: PathBuf::from("/opt/SumatraPDF.exe"),
        });
        assert_eq!(
            err.to_string(),
            "Printing failed: SumatraPDF.exe not found. /opt/SumatraPDF.exe"
        );
    }

    #[test]
    fn listing_failures_carry_their_prefix() {
        let err = ApiError::listing(DirectPrintError::Enumeration("lpstat: gone".into()));
        assert!(err.to_string().starts_with("Failed to get printers: "));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn registry_errors_map_to_client_statuses() {
        let not_found: ApiError = DirectPrintError::JobNotFound(JobId(4)).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let conflict: ApiError = DirectPrintError::InvalidTransition {
            from: JobStatus::Done,
            to: JobStatus::Pending,
        }
        .into();
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let invalid: ApiError = DirectPrintError::Validation("unknown job status".into()).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
