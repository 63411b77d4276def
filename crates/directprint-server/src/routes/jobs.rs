// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CRUD over the in-memory job registry.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use directprint_core::types::{JobId, JobUpdate, NewPrintJob, PrintJob};
use directprint_print::JobRegistry;

use crate::BASE_PATH;
use crate::error::ApiError;

pub async fn list_jobs(State(registry): State<JobRegistry>) -> Json<Vec<PrintJob>> {
    Json(registry.list())
}

pub async fn get_job(
    State(registry): State<JobRegistry>,
    Path(id): Path<u64>,
) -> Result<Json<PrintJob>, ApiError> {
    Ok(Json(registry.get(JobId(id))?))
}

/// Record a new job; responds `201` with the stored record and its location.
pub async fn create_job(
    State(registry): State<JobRegistry>,
    Json(new): Json<NewPrintJob>,
) -> impl IntoResponse {
    let job = registry.create(new);
    let location = format!("{BASE_PATH}/{}", job.id);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(job))
}

pub async fn update_job(
    State(registry): State<JobRegistry>,
    Path(id): Path<u64>,
    Json(update): Json<JobUpdate>,
) -> Result<StatusCode, ApiError> {
    registry.update(JobId(id), update)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_job(
    State(registry): State<JobRegistry>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    registry.delete(JobId(id))?;
    Ok(StatusCode::NO_CONTENT)
}
