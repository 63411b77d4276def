// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dispatch of an artifact to one or more printers through the external
// renderer (SumatraPDF).
//
// Printers are contacted strictly one after another, in the order the caller
// gave them, with a pause after each run.  The first failure aborts the whole
// loop; there is no per-printer success reporting and no retry.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, instrument, warn};

use directprint_core::error::{DirectPrintError, Result};

use crate::pacing::Pacer;

/// Something that can put one artifact on one printer.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    /// Print `artifact` on `printer` using the renderer-specific `settings`
    /// string, returning once the job has been handed off.
    async fn print(&self, artifact: &Path, printer: &str, settings: &str) -> Result<()>;
}

/// Renders through the SumatraPDF command line:
///
/// ```text
/// SumatraPDF.exe -print-to <printer> -print-settings <settings> <file>
/// ```
#[derive(Debug, Clone)]
pub struct SumatraRenderer {
    executable: PathBuf,
}

impl SumatraRenderer {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Build the renderer invocation.  Every value is its own argv entry, so
    /// printer names and paths containing spaces survive intact.
    fn command(&self, artifact: &Path, printer: &str, settings: &str) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-print-to")
            .arg(printer)
            .arg("-print-settings")
            .arg(settings)
            .arg(artifact)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        cmd.creation_flags(crate::runner::CREATE_NO_WINDOW);

        cmd
    }
}

#[async_trait]
impl RenderBackend for SumatraRenderer {
    async fn print(&self, artifact: &Path, printer: &str, settings: &str) -> Result<()> {
        info!(renderer = %self.executable.display(), "resolved renderer");

        let present = tokio::fs::metadata(&self.executable)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !present {
            return Err(DirectPrintError::ExternalToolMissing {
                path: self.executable.clone(),
            });
        }

        let status = self
            .command(artifact, printer, settings)
            .status()
            .await
            .map_err(|e| {
                DirectPrintError::Subprocess(format!("{}: {e}", self.executable.display()))
            })?;

        // The exit code is not a reliable signal from SumatraPDF; a returned
        // process counts as a handed-off job.
        if !status.success() {
            warn!(printer, code = ?status.code(), "renderer exited with non-zero status");
        }
        Ok(())
    }
}

/// Runs one renderer invocation per printer, pacing between them.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn RenderBackend>,
    pacer: Arc<dyn Pacer>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn RenderBackend>, pacer: Arc<dyn Pacer>) -> Self {
        Self { backend, pacer }
    }

    /// Print `artifact` on every printer in `printers`, in order.
    ///
    /// Each run is awaited to completion and followed by a pause before the
    /// next printer is contacted.  The first error stops the loop and is
    /// returned as-is.
    #[instrument(skip(self, artifact, printers), fields(printer_count = printers.len()))]
    pub async fn dispatch(&self, artifact: &Path, printers: &[String], scale: &str) -> Result<()> {
        for (index, printer) in printers.iter().enumerate() {
            info!(index, printer = %printer, scale, "dispatching to printer");
            self.backend.print(artifact, printer, scale).await?;
            self.pacer.pause().await;
        }
        info!(count = printers.len(), "dispatch complete");
        Ok(())
    }
}
