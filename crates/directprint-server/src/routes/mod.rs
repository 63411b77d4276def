// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Route table for `/api/print`.

pub mod info;
pub mod jobs;
pub mod printers;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// All endpoints, unlayered and without state.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/print", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/print/GetApp", get(info::get_app))
        .route("/api/print/printers", get(printers::list_printers))
        .route("/api/print/upload", post(upload::upload))
        .route("/api/print/upload-with-scale", post(upload::upload_with_scale))
        .route(
            "/api/print/upload-with-scale-image",
            post(upload::upload_with_scale_image),
        )
        .route(
            "/api/print/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
}
