// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use tracing::debug;

use directprint_print::PrinterSource;

use crate::error::ApiError;

/// Names of the printers installed on the host.
pub async fn list_printers(
    State(source): State<Arc<dyn PrinterSource>>,
) -> Result<Json<Vec<String>>, ApiError> {
    debug!(mechanism = source.mechanism(), "listing printers");
    let printers = source.list_printers().await.map_err(ApiError::listing)?;
    Ok(Json(printers))
}
