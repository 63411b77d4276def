// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Temporary on-disk copies of uploaded documents.
//
// The external renderer only accepts a file path, so every upload is written
// to `<temp dir>/<uuid>.<ext>` before dispatch and deleted afterwards.  An
// artifact belongs to exactly one request; names are random v4 UUIDs so
// concurrent requests never collide.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use directprint_core::error::Result;
use directprint_core::types::DocumentKind;

/// Creates and removes artifacts inside one directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Copy the whole of `reader` into a fresh artifact file.
    ///
    /// The file is flushed and closed before this returns, so the path can be
    /// handed to another process immediately.  If the copy fails the partial
    /// file is removed.
    #[instrument(skip(self, reader), fields(dir = %self.dir.display()))]
    pub async fn persist<R>(&self, mut reader: R, kind: DocumentKind) -> Result<Artifact>
    where
        R: AsyncRead + Unpin,
    {
        let path = self
            .dir
            .join(format!("{}{}", Uuid::new_v4(), kind.extension()));
        // Owning the path from here on means an early return cleans up.
        let artifact = Artifact::new(path);

        let mut file = File::create(artifact.path()).await?;
        let bytes = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        debug!(path = %artifact.path().display(), bytes, "artifact written");
        Ok(artifact)
    }

    /// Delete an artifact.  A file that is already gone is not an error.
    pub async fn remove(&self, mut artifact: Artifact) {
        artifact.armed = false;
        match tokio::fs::remove_file(&artifact.path).await {
            Ok(()) => debug!(path = %artifact.path.display(), "artifact removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %artifact.path.display(),
                error = %e,
                "failed to remove artifact"
            ),
        }
    }
}

/// A temporary document file owned by one upload.
///
/// Dropping an `Artifact` that was not passed to [`ArtifactStore::remove`]
/// deletes the file synchronously, so a request future cancelled mid-dispatch
/// still leaves nothing behind.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
    armed: bool,
}

impl Artifact {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "artifact removed on drop"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove artifact on drop"
            ),
        }
    }
}
