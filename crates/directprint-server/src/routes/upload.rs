// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload-and-print endpoints.
//
// All three take a multipart form with one `file` part and any number of
// `printerNames` parts.  The scaled variants also read an optional `scale`
// part, passed to the renderer as its print settings.
//
// The file part is streamed straight into an artifact as it arrives, so the
// printer names may come before or after it.

use std::io;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use futures_util::{StreamExt, TryStreamExt, stream};
use tokio_util::io::StreamReader;
use tracing::{info, warn};

use directprint_core::types::DocumentKind;
use directprint_print::{Artifact, PrintPipeline};

use crate::error::ApiError;

const DEFAULT_SCALE: &str = "fit";

const NO_FILE: &str = "No file uploaded.";
const PNG_ONLY: &str = "Only .png files are supported for this endpoint.";

/// Which uploads an endpoint takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    /// Anything, stored as a PDF.
    Pdf,
    /// Only files named `*.png`.
    PngOnly,
}

impl Accept {
    fn kind(self) -> DocumentKind {
        match self {
            Self::Pdf => DocumentKind::Pdf,
            Self::PngOnly => DocumentKind::Png,
        }
    }
}

/// Parsed upload form.
#[derive(Debug, Default)]
struct UploadForm {
    file_name: String,
    artifact: Option<Artifact>,
    printer_names: Vec<String>,
    scale: Option<String>,
}

impl UploadForm {
    /// Collect the known parts; anything else in the form is skipped.  Part
    /// names are matched case-insensitively.
    async fn read(
        mut multipart: Multipart,
        pipeline: &PrintPipeline,
        accept: Accept,
    ) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_ascii_lowercase();
            match name.as_str() {
                "file" => {
                    form.file_name = field.file_name().unwrap_or_default().to_string();
                    form.artifact = persist_file(pipeline, field, &form.file_name, accept).await?;
                }
                "printernames" => form.printer_names.push(field.text().await?),
                "scale" => form.scale = Some(field.text().await?),
                _ => {}
            }
        }
        Ok(form)
    }

    fn scale_or_default(&self) -> String {
        match self.scale.as_deref().map(str::trim) {
            Some(scale) if !scale.is_empty() => scale.to_string(),
            _ => DEFAULT_SCALE.to_string(),
        }
    }
}

/// Stream one `file` part into a new artifact.
///
/// An empty part yields `None`.  A part the endpoint does not accept is
/// refused after its first chunk, before anything is written.
async fn persist_file(
    pipeline: &PrintPipeline,
    mut field: Field<'_>,
    file_name: &str,
    accept: Accept,
) -> Result<Option<Artifact>, ApiError> {
    let first = loop {
        match field.chunk().await? {
            Some(chunk) if chunk.is_empty() => continue,
            Some(chunk) => break chunk,
            None => return Ok(None),
        }
    };
    if accept == Accept::PngOnly && DocumentKind::from_file_name(file_name) != Some(DocumentKind::Png)
    {
        return Err(ApiError::BadRequest(PNG_ONLY.into()));
    }

    let body = stream::once(async move { Ok(first) })
        .chain(field)
        .map_err(io::Error::other);
    let reader = std::pin::pin!(StreamReader::new(body));

    let artifact = pipeline
        .persist(reader, accept.kind())
        .await
        .map_err(ApiError::printing)?;
    Ok(Some(artifact))
}

/// Validate the form and print it on its own task, so a client hanging up
/// does not cut the printer loop short.
async fn print_form(pipeline: &PrintPipeline, form: UploadForm, scale: String) -> Result<(), ApiError> {
    let Some(artifact) = form.artifact else {
        return Err(ApiError::BadRequest(NO_FILE.into()));
    };
    if form.printer_names.is_empty() {
        warn!(file = %form.file_name, "upload names no printers, nothing will be printed");
    }
    info!(
        file = %form.file_name,
        printers = ?form.printer_names,
        scale = %scale,
        "printing upload"
    );

    pipeline
        .print_detached(artifact, form.printer_names, scale)
        .await
        .map_err(ApiError::printing)
}

/// Print a PDF on every named printer, scaled to fit.
pub async fn upload(
    State(pipeline): State<PrintPipeline>,
    multipart: Multipart,
) -> Result<&'static str, ApiError> {
    let form = UploadForm::read(multipart, &pipeline, Accept::Pdf).await?;
    print_form(&pipeline, form, DEFAULT_SCALE.to_string()).await?;
    Ok("Printed successfully")
}

/// Print a PDF on every named printer with the requested scale.
pub async fn upload_with_scale(
    State(pipeline): State<PrintPipeline>,
    multipart: Multipart,
) -> Result<&'static str, ApiError> {
    let form = UploadForm::read(multipart, &pipeline, Accept::Pdf).await?;
    let scale = form.scale_or_default();
    print_form(&pipeline, form, scale).await?;
    Ok("Printed successfully")
}

/// Print a PNG on every named printer with the requested scale.  Any other
/// extension is refused before anything touches the disk.
pub async fn upload_with_scale_image(
    State(pipeline): State<PrintPipeline>,
    multipart: Multipart,
) -> Result<&'static str, ApiError> {
    let form = UploadForm::read(multipart, &pipeline, Accept::PngOnly).await?;
    let scale = form.scale_or_default();
    print_form(&pipeline, form, scale).await?;
    Ok("Image printed successfully")
}
