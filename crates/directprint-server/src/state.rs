// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared state handed to every request handler.

use std::sync::Arc;

use axum::extract::FromRef;

use directprint_core::ServiceConfig;
use directprint_print::{
    ArtifactStore, Dispatcher, FixedPacer, JobRegistry, PrintPipeline, PrinterSource,
    SumatraRenderer, platform_source,
};

/// Everything the routes need, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Process-lifetime job records.
    pub registry: JobRegistry,
    /// Host printer listing.
    pub printers: Arc<dyn PrinterSource>,
    /// Persist, dispatch, clean up.
    pub pipeline: PrintPipeline,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        registry: JobRegistry,
        printers: Arc<dyn PrinterSource>,
        pipeline: PrintPipeline,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            registry,
            printers,
            pipeline,
            max_upload_bytes,
        }
    }

    /// Wire up the real host integrations: the platform printer source,
    /// SumatraPDF at the configured path, and the configured pacing.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let dispatcher = Dispatcher::new(
            Arc::new(SumatraRenderer::new(&config.renderer_path)),
            Arc::new(FixedPacer::new(config.pacing())),
        );
        Self::new(
            JobRegistry::new(),
            Arc::from(platform_source()),
            PrintPipeline::new(ArtifactStore::new(&config.temp_dir), dispatcher),
            config.max_upload_bytes,
        )
    }
}

impl FromRef<AppState> for JobRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PrinterSource> {
    fn from_ref(state: &AppState) -> Self {
        state.printers.clone()
    }
}

impl FromRef<AppState> for PrintPipeline {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}
