//! Cycle runner driving the sync.
//!
//! The `CycleRunner` is the run loop that:
//! - Fetches commenters, pauses, and syncs them one by one
//! - Fetches likers and syncs them
//! - Triggers the follow-up agent
//! - Sleeps for the interval and starts over (unless running once)
//!
//! # Architecture
//!
//! ```text
//! Idle
//!  └─► FetchingCommenters ─(pacing delay)─► ProcessingCommenters
//!        └─► FetchingLikers ─► ProcessingLikers ─► TriggeringNext
//!              └─► Idle (sleep interval) | Terminated
//! ```
//!
//! Shutdown is a [`CancellationToken`]. It interrupts the pacing delay and the
//! interval sleep right away, but a record that is being synced always
//! finishes its writes first.
//!
//! # Example
//!
//! ```ignore
//! let runner = CycleRunner::with_config(deps, CycleRunnerConfig::default());
//! runner.run_until_shutdown().await?;
//! ```

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domains::contacts::{sync_record, RawEngagementRecord, RecordOutcome, StoreWrite};
use crate::kernel::SyncDeps;

/// Configuration for the cycle runner.
#[derive(Debug, Clone)]
pub struct CycleRunnerConfig {
    /// Wait between fetching commenters and processing them
    pub pacing_delay: Duration,
    /// Sleep between two cycles in loop mode
    pub interval: Duration,
    /// Run a single cycle and stop
    pub once: bool,
}

impl Default for CycleRunnerConfig {
    fn default() -> Self {
        Self {
            pacing_delay: Duration::from_secs(30),
            interval: Duration::from_secs(60 * 60),
            once: false,
        }
    }
}

impl CycleRunnerConfig {
    pub fn once() -> Self {
        Self {
            once: true,
            ..Default::default()
        }
    }
}

/// Where the runner is within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    FetchingCommenters,
    ProcessingCommenters,
    FetchingLikers,
    ProcessingLikers,
    TriggeringNext,
    Terminated,
}

/// Counters for one cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub commenters: usize,
    pub likers: usize,
    /// Records that went through the pipeline, skipped ones included
    pub processed: usize,
    pub skipped: usize,
    pub created: usize,
    pub updated: usize,
    pub store_failures: usize,
    pub outreach_failures: usize,
    pub crm_failures: usize,
    /// Result of the follow-up trigger; `None` if it was not reached
    pub triggered: Option<bool>,
    /// Why the cycle stopped early after a feed failure
    pub aborted: Option<String>,
    /// Shutdown was requested before the cycle completed
    pub interrupted: bool,
}

impl CycleReport {
    fn new() -> Self {
        Self {
            cycle_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            commenters: 0,
            likers: 0,
            processed: 0,
            skipped: 0,
            created: 0,
            updated: 0,
            store_failures: 0,
            outreach_failures: 0,
            crm_failures: 0,
            triggered: None,
            aborted: None,
            interrupted: false,
        }
    }

    fn record(&mut self, outcome: &RecordOutcome) {
        self.processed += 1;
        match outcome {
            RecordOutcome::Skipped(_) => self.skipped += 1,
            RecordOutcome::Synced(report) => {
                match report.store {
                    StoreWrite::Created { .. } => self.created += 1,
                    StoreWrite::Updated { .. } => self.updated += 1,
                    StoreWrite::Failed(_) => self.store_failures += 1,
                }
                if !report.outreach.is_ok() {
                    self.outreach_failures += 1;
                }
                if !report.crm.is_ok() {
                    self.crm_failures += 1;
                }
            }
        }
    }

    /// The cycle ran through the follow-up trigger.
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none() && !self.interrupted
    }
}

/// Runs sync cycles once or on an interval.
pub struct CycleRunner {
    deps: SyncDeps,
    config: CycleRunnerConfig,
    shutdown: CancellationToken,
}

impl CycleRunner {
    /// Create a new runner with default configuration.
    pub fn new(deps: SyncDeps) -> Self {
        Self::with_config(deps, CycleRunnerConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(deps: SyncDeps, config: CycleRunnerConfig) -> Self {
        Self {
            deps,
            config,
            shutdown: CancellationToken::new(),
        }
    }

    /// Get a shutdown handle for graceful shutdown.
    ///
    /// Call `cancel()` on the returned token to stop the runner.
    pub fn shutdown_handle(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Request shutdown of the runner.
    pub fn request_shutdown(&self) {
        self.shutdown.cancel();
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn transition(&self, cycle_id: Uuid, state: CycleState) {
        debug!(cycle_id = %cycle_id, state = ?state, "cycle state");
    }

    /// Sleep unless shutdown comes first. Returns false when interrupted.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.shutdown.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }

    /// Sync a batch record by record. Returns false if shutdown was requested
    /// at any point, including while the last record was in flight.
    async fn process_batch(
        &self,
        batch: &[RawEngagementRecord],
        report: &mut CycleReport,
    ) -> bool {
        for record in batch {
            // The check sits between records: a started record always completes
            if self.is_shutdown_requested() {
                return false;
            }

            let outcome = sync_record(record, &self.deps).await;
            report.record(&outcome);
        }
        // Shutdown during the last record still stops the cycle here
        !self.is_shutdown_requested()
    }

    fn finish(&self, mut report: CycleReport) -> CycleReport {
        report.finished_at = Some(Utc::now());
        report
    }

    /// Run a single cycle.
    ///
    /// Feed failures end the cycle early and are reported, never returned as
    /// errors, so the loop keeps going.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::new();
        let cycle_id = report.cycle_id;
        info!(cycle_id = %cycle_id, "=== Run cycle started ===");

        if self.is_shutdown_requested() {
            report.interrupted = true;
            return self.finish(report);
        }

        self.transition(cycle_id, CycleState::FetchingCommenters);
        let commenters = match self.deps.feed.fetch_commenters().await {
            Ok(commenters) => commenters,
            Err(e) => {
                error!(
                    cycle_id = %cycle_id,
                    error = %e,
                    "Failed to fetch commenters, aborting cycle"
                );
                report.aborted = Some(format!("fetch commenters: {:#}", e));
                return self.finish(report);
            }
        };
        report.commenters = commenters.len();
        info!(cycle_id = %cycle_id, count = commenters.len(), "Fetched commenters");

        info!(
            cycle_id = %cycle_id,
            pacing_secs = self.config.pacing_delay.as_secs_f64(),
            "Pacing before processing commenters"
        );
        if !self.pause(self.config.pacing_delay).await {
            report.interrupted = true;
            return self.finish(report);
        }

        self.transition(cycle_id, CycleState::ProcessingCommenters);
        if !self.process_batch(&commenters, &mut report).await {
            report.interrupted = true;
            return self.finish(report);
        }

        self.transition(cycle_id, CycleState::FetchingLikers);
        let likers = match self.deps.feed.fetch_likers().await {
            Ok(likers) => likers,
            Err(e) => {
                error!(cycle_id = %cycle_id, error = %e, "Failed to fetch likers, aborting cycle");
                report.aborted = Some(format!("fetch likers: {:#}", e));
                return self.finish(report);
            }
        };
        report.likers = likers.len();
        info!(cycle_id = %cycle_id, count = likers.len(), "Fetched likers");

        self.transition(cycle_id, CycleState::ProcessingLikers);
        if !self.process_batch(&likers, &mut report).await {
            report.interrupted = true;
            return self.finish(report);
        }

        self.transition(cycle_id, CycleState::TriggeringNext);
        let triggered = match self.deps.feed.trigger_next().await {
            Ok(true) => true,
            Ok(false) => {
                warn!(cycle_id = %cycle_id, "Follow-up agent was not triggered");
                false
            }
            Err(e) => {
                warn!(cycle_id = %cycle_id, error = %e, "Failed to trigger follow-up agent");
                false
            }
        };
        report.triggered = Some(triggered);

        self.transition(cycle_id, CycleState::Idle);
        let report = self.finish(report);
        info!(
            cycle_id = %cycle_id,
            processed = report.processed,
            skipped = report.skipped,
            created = report.created,
            updated = report.updated,
            store_failures = report.store_failures,
            outreach_failures = report.outreach_failures,
            crm_failures = report.crm_failures,
            "=== Run cycle finished ==="
        );
        report
    }

    /// Run cycles until shutdown is requested, or a single one in once-mode.
    pub async fn run(self) -> Result<()> {
        info!(
            once = self.config.once,
            interval_secs = self.config.interval.as_secs(),
            pacing_secs = self.config.pacing_delay.as_secs(),
            "cycle runner starting"
        );

        loop {
            if self.is_shutdown_requested() {
                break;
            }

            let report = self.run_cycle().await;
            if let Some(reason) = &report.aborted {
                warn!(cycle_id = %report.cycle_id, reason = %reason, "cycle aborted");
            }

            if self.config.once {
                break;
            }

            info!(
                interval_minutes = self.config.interval.as_secs() / 60,
                "Sleeping until next cycle"
            );
            if !self.pause(self.config.interval).await {
                break;
            }
        }

        self.transition(Uuid::nil(), CycleState::Terminated);
        info!("cycle runner stopped");
        Ok(())
    }

    /// Run until a shutdown signal is received.
    ///
    /// Convenience method that listens for Ctrl+C.
    pub async fn run_until_shutdown(self) -> Result<()> {
        let shutdown = self.shutdown_handle();

        // Spawn signal handler
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted by user, finishing current record");
                shutdown.cancel();
            }
        });

        self.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::contacts::{SkipReason, SyncReport, WriteStatus};

    #[test]
    fn test_config_defaults() {
        let config = CycleRunnerConfig::default();
        assert_eq!(config.pacing_delay, Duration::from_secs(30));
        assert_eq!(config.interval, Duration::from_secs(3600));
        assert!(!config.once);
        assert!(CycleRunnerConfig::once().once);
    }

    #[test]
    fn test_report_counts_outcomes() {
        let mut report = CycleReport::new();
        report.record(&RecordOutcome::Skipped(SkipReason::NoEmail));
        report.record(&RecordOutcome::Synced(SyncReport {
            email: "a@example.com".into(),
            store: StoreWrite::Created {
                record_id: "rec1".into(),
            },
            outreach: WriteStatus::Rejected,
            crm: WriteStatus::Done,
        }));
        report.record(&RecordOutcome::Synced(SyncReport {
            email: "b@example.com".into(),
            store: StoreWrite::Failed("boom".into()),
            outreach: WriteStatus::Done,
            crm: WriteStatus::Failed("down".into()),
        }));

        assert_eq!(report.processed, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.created, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(report.store_failures, 1);
        assert_eq!(report.outreach_failures, 1);
        assert_eq!(report.crm_failures, 1);
    }

    #[tokio::test]
    async fn test_cancelled_runner_does_nothing() {
        let runner = CycleRunner::with_config(SyncDeps::simulated(), CycleRunnerConfig::once());
        runner.request_shutdown();

        let report = runner.run_cycle().await;
        assert!(report.interrupted);
        assert_eq!(report.processed, 0);
        assert_eq!(report.commenters, 0);
    }
}
