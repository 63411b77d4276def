// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test harness: a real server on an ephemeral port with the host
// integrations swapped for fakes.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::net::TcpListener;

use directprint_core::error::{DirectPrintError, Result};
use directprint_print::{
    ArtifactStore, Dispatcher, FixedPacer, JobRegistry, NoPacing, Pacer, PrintPipeline,
    PrinterSource, RenderBackend,
};

use crate::state::AppState;

const TEST_UPLOAD_LIMIT: usize = 1024 * 1024;

/// One recorded renderer run.
#[derive(Debug, Clone)]
pub(crate) struct RenderCall {
    pub printer: String,
    pub settings: String,
    pub artifact: PathBuf,
    pub artifact_existed: bool,
}

/// Renderer that records each run and can fail on the nth one.
#[derive(Default)]
pub(crate) struct FakeRenderer {
    calls: Mutex<Vec<RenderCall>>,
    fail_on: Option<usize>,
}

impl FakeRenderer {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RenderBackend for FakeRenderer {
    async fn print(&self, artifact: &Path, printer: &str, settings: &str) -> Result<()> {
        let mut calls = self.calls.lock().expect("calls lock");
        calls.push(RenderCall {
            printer: printer.to_string(),
            settings: settings.to_string(),
            artifact: artifact.to_path_buf(),
            artifact_existed: artifact.is_file(),
        });
        if self.fail_on == Some(calls.len() - 1) {
            return Err(DirectPrintError::Subprocess(format!("{printer} is offline")));
        }
        Ok(())
    }
}

/// Printer source returning a canned answer.
pub(crate) enum FakePrinters {
    Listing(Vec<String>),
    Broken(String),
}

#[async_trait]
impl PrinterSource for FakePrinters {
    fn mechanism(&self) -> &'static str {
        "fake"
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        match self {
            Self::Listing(names) => Ok(names.clone()),
            Self::Broken(message) => Err(DirectPrintError::Enumeration(message.clone())),
        }
    }
}

#[derive(Default)]
pub(crate) struct HarnessBuilder {
    renderer: Option<FakeRenderer>,
    printers: Option<FakePrinters>,
    pacing: Option<Duration>,
}

impl HarnessBuilder {
    pub fn renderer(mut self, renderer: FakeRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn printers(mut self, printers: FakePrinters) -> Self {
        self.printers = Some(printers);
        self
    }

    pub fn pacing(mut self, delay: Duration) -> Self {
        self.pacing = Some(delay);
        self
    }

    pub async fn start(self) -> Harness {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let renderer = Arc::new(self.renderer.unwrap_or_default());
        let printers = self
            .printers
            .unwrap_or_else(|| FakePrinters::Listing(Vec::new()));

        let pacer: Arc<dyn Pacer> = match self.pacing {
            Some(delay) => Arc::new(FixedPacer::new(delay)),
            None => Arc::new(NoPacing),
        };

        let pipeline = PrintPipeline::new(
            ArtifactStore::new(temp_dir.path()),
            Dispatcher::new(renderer.clone(), pacer),
        );
        let state = AppState::new(
            JobRegistry::new(),
            Arc::new(printers),
            pipeline,
            TEST_UPLOAD_LIMIT,
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = crate::router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Harness {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            state,
            renderer,
            temp_dir,
        }
    }
}

/// A running server plus handles onto its fakes.
pub(crate) struct Harness {
    base: String,
    pub client: reqwest::Client,
    pub state: AppState,
    pub renderer: Arc<FakeRenderer>,
    temp_dir: TempDir,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    pub async fn start() -> Self {
        Self::builder().start().await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn temp_dir_is_empty(&self) -> bool {
        std::fs::read_dir(self.temp_dir.path())
            .expect("read temp dir")
            .next()
            .is_none()
    }
}
