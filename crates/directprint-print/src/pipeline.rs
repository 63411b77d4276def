// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload-to-paper pipeline: persist the payload, dispatch it to every
// requested printer, and remove the temporary file whatever happened.

use tokio::io::AsyncRead;
use tracing::{error, info, instrument};

use directprint_core::error::{DirectPrintError, Result};
use directprint_core::types::DocumentKind;

use crate::artifact::{Artifact, ArtifactStore};
use crate::dispatcher::Dispatcher;

/// Ties the artifact store to the dispatcher for one upload at a time.
#[derive(Clone)]
pub struct PrintPipeline {
    store: ArtifactStore,
    dispatcher: Dispatcher,
}

impl PrintPipeline {
    pub fn new(store: ArtifactStore, dispatcher: Dispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Write the whole of `payload` to a fresh artifact.
    pub async fn persist<R>(&self, payload: R, kind: DocumentKind) -> Result<Artifact>
    where
        R: AsyncRead + Unpin,
    {
        self.store.persist(payload, kind).await
    }

    /// Print `artifact` on each of `printers`, then remove it.
    ///
    /// The artifact is removed before the dispatch outcome is returned, on
    /// success and on failure alike.
    #[instrument(skip(self, artifact, printers), fields(printer_count = printers.len()))]
    pub async fn print(&self, artifact: Artifact, printers: &[String], scale: &str) -> Result<()> {
        let outcome = self
            .dispatcher
            .dispatch(artifact.path(), printers, scale)
            .await;

        self.store.remove(artifact).await;

        match &outcome {
            Ok(()) => info!("upload printed"),
            Err(e) => error!(error = %e, "upload failed to print"),
        }
        outcome
    }

    /// Same as [`print`](Self::print), but on its own task.
    ///
    /// Dropping the returned future does not stop the dispatch loop: every
    /// printer is still contacted and the artifact is still removed.
    pub async fn print_detached(
        &self,
        artifact: Artifact,
        printers: Vec<String>,
        scale: String,
    ) -> Result<()> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.print(artifact, &printers, &scale).await })
            .await
            .map_err(|e| DirectPrintError::Subprocess(format!("dispatch task ended abnormally: {e}")))?
    }
}
