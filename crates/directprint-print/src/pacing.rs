// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pause between consecutive dispatches of one upload.
//
// Slow physical printers garble output when two renderer runs overlap, so
// the dispatcher waits after each one.  The wait goes through `Pacer` so tests
// can count pauses instead of sleeping.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// Inserts the pause that follows each dispatch.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a fixed duration on the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct FixedPacer {
    delay: Duration,
}

impl FixedPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedPacer {
    async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!(delay_ms = self.delay.as_millis() as u64, "pacing before next dispatch");
        tokio::time::sleep(self.delay).await;
    }
}

/// Does not wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fixed_pacer_waits_for_its_delay() {
        let pacer = FixedPacer::new(Duration::from_millis(2000));
        let start = tokio::time::Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn zero_delay_returns_immediately() {
        let pacer = FixedPacer::new(Duration::ZERO);
        let start = std::time::Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
