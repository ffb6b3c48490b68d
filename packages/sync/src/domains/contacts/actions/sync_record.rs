//! Sync one engagement record into the downstream systems.
//!
//! enrich → resolve email → store lookup → plan → execute:
//! store create/update, then outreach and CRM concurrently. Every failure is
//! logged and reported in the outcome; none of them stops the other writes.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::domains::contacts::models::{ContactFields, ContactRecord, RawEngagementRecord};
use crate::domains::contacts::reconcile::{plan_record, StoreLookup, StoreOp};
use crate::kernel::SyncDeps;

/// Why a record produced no writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Enrichment returned no email
    NoEmail,
    /// The enrichment call itself failed
    EnrichmentFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Created { record_id: String },
    Updated { record_id: String },
    /// Lookup or write failed
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    Done,
    /// The call succeeded but the system reported it did not apply the write
    Rejected,
    Failed(String),
}

impl WriteStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteStatus::Done)
    }

    fn from_result(result: Result<bool>) -> Self {
        match result {
            Ok(true) => WriteStatus::Done,
            Ok(false) => WriteStatus::Rejected,
            Err(e) => WriteStatus::Failed(format!("{:#}", e)),
        }
    }
}

/// Status of each downstream write for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub email: String,
    pub store: StoreWrite,
    pub outreach: WriteStatus,
    pub crm: WriteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Skipped(SkipReason),
    Synced(SyncReport),
}

/// Run the full reconciliation for one record.
///
/// Never fails: every error is converted into a skip or a failed write in the
/// returned outcome.
pub async fn sync_record(record: &RawEngagementRecord, deps: &SyncDeps) -> RecordOutcome {
    let profile = match deps.enrichment.enrich(record).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(
                profile_url = %record.profile_url,
                error = %e,
                "Enrichment failed, skipping record"
            );
            return RecordOutcome::Skipped(SkipReason::EnrichmentFailed(e.to_string()));
        }
    };

    let Some(email) = profile.primary_email().map(str::to_string) else {
        warn!(
            name = %profile.full_name,
            profile_url = %record.profile_url,
            "No email found, skipping contact"
        );
        return RecordOutcome::Skipped(SkipReason::NoEmail);
    };

    info!(name = %profile.full_name, email = %email, "Enriched person");

    let lookup = match deps.contact_store.find_by_email(&email).await {
        Ok(matches) => {
            debug!(email = %email, matches = matches.len(), "Contact store lookup");
            StoreLookup::Matches(matches)
        }
        Err(e) => {
            warn!(email = %email, error = %e, "Contact store lookup failed, skipping store write");
            StoreLookup::Failed
        }
    };

    let plan = plan_record(&email, &profile, &lookup);

    let store = execute_store_op(&plan.store_op, deps).await;

    // Outreach and CRM are independent of each other; both always run
    let (outreach, crm) = tokio::join!(
        deps.outreach.add_lead(&plan.outreach),
        deps.crm.upsert_contact(&plan.crm),
    );
    let outreach = WriteStatus::from_result(outreach);
    let crm = WriteStatus::from_result(crm);

    if !outreach.is_ok() {
        warn!(email = %email, status = ?outreach, "Outreach add_lead did not succeed");
    }
    if !crm.is_ok() {
        warn!(email = %email, status = ?crm, "CRM upsert did not succeed");
    }

    RecordOutcome::Synced(SyncReport {
        email: plan.email,
        store,
        outreach,
        crm,
    })
}

async fn execute_store_op(op: &StoreOp, deps: &SyncDeps) -> StoreWrite {
    match op {
        StoreOp::Create(fields) => {
            written(deps.contact_store.create(fields).await, fields, |record_id| {
                StoreWrite::Created { record_id }
            })
        }
        StoreOp::Update { record_id, fields } => {
            written(
                deps.contact_store.update(record_id, fields).await,
                fields,
                |record_id| StoreWrite::Updated { record_id },
            )
        }
        StoreOp::Skip => StoreWrite::Failed("contact store lookup failed".to_string()),
    }
}

fn written(
    result: Result<ContactRecord>,
    fields: &ContactFields,
    on_success: impl FnOnce(String) -> StoreWrite,
) -> StoreWrite {
    match result {
        Ok(record) => {
            let write = on_success(record.id);
            info!(email = %fields.email, write = ?write, "Contact store written");
            write
        }
        Err(e) => {
            warn!(email = %fields.email, error = %e, "Contact store write failed");
            StoreWrite::Failed(format!("{:#}", e))
        }
    }
}
