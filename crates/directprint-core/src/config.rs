// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service configuration, read from the process environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DirectPrintError, Result};

/// Environment variable overriding the renderer executable path.
pub const RENDERER_PATH_VAR: &str = "SUMATRA_PATH";
/// Environment variable overriding the listen address.
pub const BIND_VAR: &str = "DIRECTPRINT_BIND";
/// Environment variable overriding the pause between dispatches.
pub const PACING_MS_VAR: &str = "DIRECTPRINT_PACING_MS";
/// Environment variable overriding the artifact directory.
pub const TEMP_DIR_VAR: &str = "DIRECTPRINT_TEMP_DIR";
/// Environment variable overriding the request body limit.
pub const MAX_UPLOAD_VAR: &str = "DIRECTPRINT_MAX_UPLOAD_BYTES";

/// Where SumatraPDF lands with a default per-machine install.
pub const DEFAULT_RENDERER_PATH: &str = r"C:\Program Files\SumatraPDF\SumatraPDF.exe";

/// Installer handed out by the info endpoint.
pub const RENDERER_INSTALLER_URL: &str =
    "https://www.sumatrapdfreader.org/dl/rel/3.5.2/SumatraPDF-3.5.2-64-install.exe";

/// Default pause between two dispatches of the same upload.
pub const DEFAULT_PACING_MS: u64 = 2000;

/// Default request body cap.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024; // 64 MiB

/// Runtime settings for the print service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Path of the external renderer executable.
    pub renderer_path: PathBuf,
    /// Pause inserted after every dispatch, in milliseconds.
    pub pacing_ms: u64,
    /// Directory receiving the temporary artifacts.
    pub temp_dir: PathBuf,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            renderer_path: PathBuf::from(DEFAULT_RENDERER_PATH),
            pacing_ms: DEFAULT_PACING_MS,
            temp_dir: std::env::temp_dir(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Unset or blank variables keep their defaults; values that are set but
    /// do not parse are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(RENDERER_PATH_VAR) {
            config.renderer_path = PathBuf::from(path);
        }
        if let Some(addr) = get(BIND_VAR) {
            config.bind_addr = addr.trim().parse().map_err(|e| {
                DirectPrintError::Validation(format!("{BIND_VAR}={addr:?}: {e}"))
            })?;
        }
        if let Some(ms) = get(PACING_MS_VAR) {
            config.pacing_ms = ms.trim().parse().map_err(|e| {
                DirectPrintError::Validation(format!("{PACING_MS_VAR}={ms:?}: {e}"))
            })?;
        }
        if let Some(dir) = get(TEMP_DIR_VAR) {
            config.temp_dir = PathBuf::from(dir);
        }
        if let Some(bytes) = get(MAX_UPLOAD_VAR) {
            config.max_upload_bytes = bytes.trim().parse().map_err(|e| {
                DirectPrintError::Validation(format!("{MAX_UPLOAD_VAR}={bytes:?}: {e}"))
            })?;
        }

        Ok(config)
    }

    /// Pause between dispatches as a `Duration`.
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ServiceConfig::from_lookup(|_| None).expect("config");
        assert_eq!(config.renderer_path, PathBuf::from(DEFAULT_RENDERER_PATH));
        assert_eq!(config.pacing(), Duration::from_millis(2000));
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn renderer_path_is_overridden() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(
            RENDERER_PATH_VAR,
            "/opt/sumatra/SumatraPDF.exe",
        )]))
        .expect("config");
        assert_eq!(config.renderer_path, PathBuf::from("/opt/sumatra/SumatraPDF.exe"));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config =
            ServiceConfig::from_lookup(lookup_from(&[(RENDERER_PATH_VAR, "  ")])).expect("config");
        assert_eq!(config.renderer_path, PathBuf::from(DEFAULT_RENDERER_PATH));
    }

    #[test]
    fn numeric_and_address_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (BIND_VAR, "127.0.0.1:8080"),
            (PACING_MS_VAR, "250"),
            (MAX_UPLOAD_VAR, "1024"),
            (TEMP_DIR_VAR, "/var/tmp/directprint"),
        ]))
        .expect("config");
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().expect("addr"));
        assert_eq!(config.pacing(), Duration::from_millis(250));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.temp_dir, PathBuf::from("/var/tmp/directprint"));
    }

    #[test]
    fn unparseable_pacing_is_rejected() {
        let result = ServiceConfig::from_lookup(lookup_from(&[(PACING_MS_VAR, "two seconds")]));
        assert!(matches!(result, Err(DirectPrintError::Validation(_))));
    }
}
