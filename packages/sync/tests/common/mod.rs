//! Shared helpers for the sync integration tests.

#![allow(dead_code)]

use std::time::Duration;

use campaign_sync_core::domains::contacts::RawEngagementRecord;
use campaign_sync_core::kernel::{CycleRunner, CycleRunnerConfig, SyncDeps};

/// Initialize tracing once per test binary.
///
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ada() -> RawEngagementRecord {
    RawEngagementRecord::new("Ada", "Lovelace", "https://linkedin.example/in/ada")
}

pub fn alan() -> RawEngagementRecord {
    RawEngagementRecord::new("Alan", "Turing", "https://linkedin.example/in/alan")
}

pub fn grace() -> RawEngagementRecord {
    RawEngagementRecord::new("Grace", "Hopper", "https://linkedin.example/in/grace")
}

/// Single-cycle runner without pacing delay.
pub fn once_runner(deps: SyncDeps) -> CycleRunner {
    CycleRunner::with_config(
        deps,
        CycleRunnerConfig {
            pacing_delay: Duration::ZERO,
            interval: Duration::ZERO,
            once: true,
        },
    )
}
