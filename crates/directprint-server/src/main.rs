// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DirectPrint — upload a document over HTTP and print it on host printers.
//
// Entry point. Initialises logging, reads configuration from the environment,
// and serves the API until Ctrl-C.

use tokio::net::TcpListener;

use directprint_core::ServiceConfig;
use directprint_server::AppState;

#[tokio::main]
async fn main() -> directprint_core::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    tracing::info!(
        bind = %config.bind_addr,
        renderer = %config.renderer_path.display(),
        pacing_ms = config.pacing_ms,
        temp_dir = %config.temp_dir.display(),
        "DirectPrint starting"
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    directprint_server::serve(listener, AppState::from_config(&config), shutdown_signal()).await?;

    tracing::info!("DirectPrint stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
