// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Installed-printer enumeration through the host's own utilities.
//
// Each operating system gets one `PrinterSource`:
//
//   - Windows: `powershell Get-Printer | ConvertTo-Json`, falling back to
//     `wmic printer get name` when PowerShell fails or prints nothing.
//   - Linux:   `lpstat -p` (CUPS).
//   - macOS:   `system_profiler SPPrintersDataType`.
//   - Anything else: no printers.
//
// Parsing is kept in free functions so that it can be tested against canned
// output without spawning processes.  Printer names are resolved fresh on
// every call; nothing is cached.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use directprint_core::error::Result;

use crate::runner::{CommandRunner, SystemRunner};

/// PowerShell pipeline listing printer names as JSON.
const POWERSHELL_QUERY: &str = "Get-Printer | Select-Object Name | ConvertTo-Json";

/// A host-specific way of listing installed printers.
#[async_trait]
pub trait PrinterSource: Send + Sync {
    /// Short name of the mechanism, for logs.
    fn mechanism(&self) -> &'static str;

    /// List the names of all installed printers.
    ///
    /// Any failure discards partial results; callers either get the full
    /// list or an error.
    async fn list_printers(&self) -> Result<Vec<String>>;
}

/// Select the printer source for the operating system this binary targets.
pub fn platform_source() -> Box<dyn PrinterSource> {
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsPrinterSource::new(SystemRunner))
    }
    #[cfg(target_os = "linux")]
    {
        Box::new(CupsPrinterSource::new(SystemRunner))
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(MacPrinterSource::new(SystemRunner))
    }
    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        Box::new(UnsupportedPlatform)
    }
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// PowerShell `Get-Printer` with a `wmic` fallback.
pub struct WindowsPrinterSource<R = SystemRunner> {
    runner: R,
}

impl<R: CommandRunner> WindowsPrinterSource<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<R: CommandRunner> PrinterSource for WindowsPrinterSource<R> {
    fn mechanism(&self) -> &'static str {
        "powershell"
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        match self
            .runner
            .run("powershell", &["-Command", POWERSHELL_QUERY])
            .await
        {
            Ok(ps) if ps.success && !ps.stdout.trim().is_empty() => {
                let printers = parse_powershell_json(&ps.stdout);
                info!(count = printers.len(), "printers listed via Get-Printer");
                return Ok(printers);
            }
            Ok(ps) => warn!(
                exit_ok = ps.success,
                "Get-Printer produced no usable output, falling back to wmic"
            ),
            Err(e) => warn!(error = %e, "powershell unavailable, falling back to wmic"),
        }

        let wmic = self.runner.run("wmic", &["printer", "get", "name"]).await?;
        if !wmic.success {
            warn!("wmic exited with an error, reporting no printers");
            return Ok(Vec::new());
        }

        let printers = parse_wmic_table(&wmic.stdout);
        info!(count = printers.len(), "printers listed via wmic");
        Ok(printers)
    }
}

/// One element of the `ConvertTo-Json` output.
#[derive(Debug, Deserialize)]
struct PowerShellPrinter {
    #[serde(rename = "Name", default)]
    name: Option<String>,
}

/// `ConvertTo-Json` emits a bare object for one printer and an array for more.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PowerShellListing {
    Many(Vec<PowerShellPrinter>),
    One(PowerShellPrinter),
}

/// Extract printer names from `Get-Printer | Select-Object Name | ConvertTo-Json`.
///
/// Well-formed JSON is decoded properly.  Anything else is scanned line by
/// line for a `"Name": "<value>"` pair; lines without one are skipped.
pub fn parse_powershell_json(output: &str) -> Vec<String> {
    let text = output.trim().trim_start_matches('\u{feff}');

    match serde_json::from_str::<PowerShellListing>(text) {
        Ok(listing) => {
            let records = match listing {
                PowerShellListing::Many(records) => records,
                PowerShellListing::One(record) => vec![record],
            };
            records
                .into_iter()
                .filter_map(|r| r.name)
                .filter(|name| !name.trim().is_empty())
                .collect()
        }
        Err(e) => {
            debug!(error = %e, "Get-Printer output is not valid JSON, scanning lines");
            text.lines().filter_map(extract_name_field).collect()
        }
    }
}

/// Pull the value out of a `"Name": "value"` line, if the line has one.
fn extract_name_field(line: &str) -> Option<String> {
    const KEY: &str = "\"Name\"";

    let after_key = &line[line.find(KEY)? + KEY.len()..];
    let value = after_key.trim_start().strip_prefix(':')?.trim_start();
    let value = value.strip_prefix('"')?;
    let end = value.rfind('"')?;
    let name = &value[..end];

    (!name.trim().is_empty()).then(|| name.to_string())
}

/// Extract printer names from the `wmic printer get name` table.
///
/// The first line is the `Name` header; every other non-blank line is one
/// printer.
pub fn parse_wmic_table(output: &str) -> Vec<String> {
    output
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Linux (CUPS)
// ---------------------------------------------------------------------------

/// CUPS `lpstat -p`.
pub struct CupsPrinterSource<R = SystemRunner> {
    runner: R,
}

impl<R: CommandRunner> CupsPrinterSource<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<R: CommandRunner> PrinterSource for CupsPrinterSource<R> {
    fn mechanism(&self) -> &'static str {
        "lpstat"
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        let output = self.runner.run("lpstat", &["-p"]).await?;
        if !output.success {
            // lpstat exits non-zero when no destinations are configured.
            warn!("lpstat exited with an error, reporting no printers");
            return Ok(Vec::new());
        }

        let printers = parse_lpstat(&output.stdout);
        info!(count = printers.len(), "printers listed via lpstat");
        Ok(printers)
    }
}

/// Extract printer names from `lpstat -p`.
///
/// Lines look like `printer HP-1 is idle.  enabled since ...`; the name is
/// the second whitespace-separated token.
pub fn parse_lpstat(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.starts_with("printer"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// macOS
// ---------------------------------------------------------------------------

/// `system_profiler SPPrintersDataType`.
pub struct MacPrinterSource<R = SystemRunner> {
    runner: R,
}

impl<R: CommandRunner> MacPrinterSource<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<R: CommandRunner> PrinterSource for MacPrinterSource<R> {
    fn mechanism(&self) -> &'static str {
        "system_profiler"
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        let output = self
            .runner
            .run("system_profiler", &["SPPrintersDataType"])
            .await?;
        if !output.success {
            warn!("system_profiler exited with an error, reporting no printers");
            return Ok(Vec::new());
        }

        let printers = parse_system_profiler(&output.stdout);
        info!(count = printers.len(), "printers listed via system_profiler");
        Ok(printers)
    }
}

/// Extract printer names from `system_profiler SPPrintersDataType`.
pub fn parse_system_profiler(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains("Name:"))
        .map(|line| line.replace("Name:", "").trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Everything else
// ---------------------------------------------------------------------------

/// Source for operating systems without a known printer utility.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

#[async_trait]
impl PrinterSource for UnsupportedPlatform {
    fn mechanism(&self) -> &'static str {
        "none"
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        debug!("no printer listing mechanism for this platform");
        Ok(Vec::new())
    }
}
