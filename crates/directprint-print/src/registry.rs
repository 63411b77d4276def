// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory registry of print job records.
//
// Records live only as long as the process.  The registry is a cheap clone
// handle around one mutex-guarded table, so every request handler sees the
// same records and id counter.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use directprint_core::error::{DirectPrintError, Result};
use directprint_core::types::{JobId, JobStatus, JobUpdate, NewPrintJob, PrintJob};

#[derive(Debug)]
struct Table {
    jobs: Vec<PrintJob>,
    next_id: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: 1,
        }
    }
}

impl Table {
    fn position(&self, id: JobId) -> Result<usize> {
        self.jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or(DirectPrintError::JobNotFound(id))
    }
}

/// Shared, process-lifetime store of [`PrintJob`] records.
#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    table: Arc<Mutex<Table>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the table half-updated:
    // every mutation is a single push, remove or field assignment.
    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a new job.  The status is always `Pending`, whatever the caller
    /// sent, and the id is the next value of the counter.
    #[instrument(skip(self, new), fields(document = %new.document_name))]
    pub fn create(&self, new: NewPrintJob) -> PrintJob {
        if let Some(requested) = new.status.as_deref() {
            debug!(requested, "ignoring caller-supplied status on create");
        }

        let mut table = self.lock();
        let id = JobId(table.next_id);
        table.next_id += 1;

        let job = PrintJob {
            id,
            document_name: new.document_name,
            printer_name: new.printer_name,
            status: JobStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
            copies: new.copies,
            is_color: new.is_color,
            paper_size: new.paper_size,
        };
        table.jobs.push(job.clone());

        info!(job_id = %id, "job recorded");
        job
    }

    /// Every record, in insertion order.
    pub fn list(&self) -> Vec<PrintJob> {
        self.lock().jobs.clone()
    }

    pub fn get(&self, id: JobId) -> Result<PrintJob> {
        let table = self.lock();
        let index = table.position(id)?;
        Ok(table.jobs[index].clone())
    }

    /// Apply `update` to the record with `id`.
    ///
    /// The status string must name a known state reachable from the current
    /// one.  On success the status, document name and printer name are copied
    /// over and `updated_at` is set; on any error the record is untouched.
    #[instrument(skip(self, update), fields(job_id = %id, status = %update.status))]
    pub fn update(&self, id: JobId, update: JobUpdate) -> Result<PrintJob> {
        let next: JobStatus = update.status.parse()?;

        let mut table = self.lock();
        let index = table.position(id)?;
        let job = &mut table.jobs[index];

        if !job.status.can_transition_to(next) {
            warn!(from = %job.status, to = %next, "rejected status transition");
            return Err(DirectPrintError::InvalidTransition {
                from: job.status,
                to: next,
            });
        }

        job.status = next;
        job.document_name = update.document_name;
        job.printer_name = update.printer_name;
        job.updated_at = Some(Utc::now());

        info!("job updated");
        Ok(job.clone())
    }

    /// Remove the record with `id`.  Its id is never handed out again.
    #[instrument(skip(self), fields(job_id = %id))]
    pub fn delete(&self, id: JobId) -> Result<()> {
        let mut table = self.lock();
        let index = table.position(id)?;
        table.jobs.remove(index);
        info!("job deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().jobs.is_empty()
    }
}
