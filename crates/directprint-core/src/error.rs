// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for DirectPrint.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{JobId, JobStatus};

/// Top-level error type for all DirectPrint operations.
#[derive(Debug, Error)]
pub enum DirectPrintError {
    // -- Request errors --
    #[error("{0}")]
    Validation(String),

    #[error("print job {0} not found")]
    JobNotFound(JobId),

    #[error("cannot move job from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    // -- External programs --
    #[error("SumatraPDF.exe not found. {}", path.display())]
    ExternalToolMissing { path: PathBuf },

    #[error("external command failed: {0}")]
    Subprocess(String),

    #[error("printer enumeration failed: {0}")]
    Enumeration(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirectPrintError {
    /// Whether the error was caused by the caller rather than the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::JobNotFound(_) | Self::InvalidTransition { .. }
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DirectPrintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_message_includes_path() {
        let err = DirectPrintError::ExternalToolMissing {
            path: PathBuf::from("/opt/sumatra/SumatraPDF.exe"),
        };
        assert!(err.to_string().contains("/opt/sumatra/SumatraPDF.exe"));
    }

    #[test]
    fn client_errors_are_classified() {
        assert!(DirectPrintError::Validation("empty".into()).is_client_error());
        assert!(DirectPrintError::JobNotFound(JobId(3)).is_client_error());
        assert!(!DirectPrintError::Subprocess("boom".into()).is_client_error());
    }
}
