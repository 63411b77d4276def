// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use axum::Json;

use directprint_core::config::RENDERER_INSTALLER_URL;

/// Download link for the SumatraPDF installer.
pub async fn get_app() -> Json<&'static str> {
    Json(RENDERER_INSTALLER_URL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::Harness;

    #[tokio::test]
    async fn returns_the_installer_url() {
        let harness = Harness::start().await;
        let url: String = harness
            .client
            .get(harness.url("/api/print/GetApp"))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json body");
        assert_eq!(url, RENDERER_INSTALLER_URL);
    }
}
