// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for DirectPrint.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DirectPrintError;

/// Identifier of a print job record.
///
/// Assigned by the job registry from a monotonically increasing counter that
/// starts at 1; an id is never handed out twice within one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of a print job record.
///
/// The registry only ever assigns `Pending` on its own.  Every other state is
/// set by a caller through an update, and only along the edges allowed by
/// [`JobStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Recorded, not yet handed to a printer.
    Pending,
    /// Being rendered by the external program.
    Printing,
    /// Printed.
    Done,
    /// Printing failed.
    Failed,
    /// Withdrawn by the caller.
    Cancelled,
}

impl JobStatus {
    /// All states, in declaration order.
    pub const ALL: [JobStatus; 5] = [
        Self::Pending,
        Self::Printing,
        Self::Done,
        Self::Failed,
        Self::Cancelled,
    ];

    /// Canonical name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Printing => "Printing",
            Self::Done => "Done",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether a record in this state may be moved to `next`.
    ///
    /// Re-asserting the current state is always allowed so that updates which
    /// only touch the document or printer name go through.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        use JobStatus::*;

        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Printing | Done | Failed | Cancelled)
                | (Printing, Done | Failed | Cancelled)
                | (Failed, Pending)
        )
    }

    /// Whether no further transitions leave this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DirectPrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DirectPrintError::Validation(format!("unknown job status: {s:?}")))
    }
}

/// Document formats accepted by the upload endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Png,
}

impl DocumentKind {
    /// File extension (with leading dot) used for the on-disk artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Png => ".png",
        }
    }

    /// Infer the kind from an uploaded file name (case-insensitive).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = std::path::Path::new(name).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// A print job record.
///
/// This is a status log entry, not an active task: nothing in the dispatch
/// pipeline reads it, and `copies`, `is_color` and `paper_size` are
/// descriptive only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    pub id: JobId,
    pub document_name: String,
    pub printer_name: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub copies: u32,
    pub is_color: bool,
    pub paper_size: String,
}

fn default_copies() -> u32 {
    1
}

fn default_paper_size() -> String {
    "A4".into()
}

/// Caller-supplied fields for a new job record.
///
/// A `status` sent by the caller is accepted and ignored; new records always
/// start as `Pending`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrintJob {
    #[serde(default)]
    pub document_name: String,
    #[serde(default)]
    pub printer_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "default_copies")]
    pub copies: u32,
    #[serde(default)]
    pub is_color: bool,
    #[serde(default = "default_paper_size")]
    pub paper_size: String,
}

impl NewPrintJob {
    pub fn new(document_name: impl Into<String>, printer_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            printer_name: printer_name.into(),
            status: None,
            copies: default_copies(),
            is_color: false,
            paper_size: default_paper_size(),
        }
    }
}

/// Fields copied onto an existing record by an update.
///
/// A missing `status` reads as the empty string, which the registry rejects
/// as an unknown status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub document_name: String,
    #[serde(default)]
    pub printer_name: String,
}
