// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DirectPrint Print — host printer enumeration, temporary artifact storage,
// dispatch to the external renderer, and the in-memory job registry.  This
// crate bridges between the core domain types defined in `directprint-core`
// and the processes and files of the host operating system.

pub mod artifact;
pub mod dispatcher;
pub mod enumerator;
pub mod pacing;
pub mod pipeline;
pub mod registry;
pub mod runner;

pub use artifact::{Artifact, ArtifactStore};
pub use dispatcher::{Dispatcher, RenderBackend, SumatraRenderer};
pub use enumerator::{PrinterSource, platform_source};
pub use pacing::{FixedPacer, NoPacing, Pacer};
pub use pipeline::PrintPipeline;
pub use registry::JobRegistry;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
