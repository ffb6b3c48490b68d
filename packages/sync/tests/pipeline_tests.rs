//! Per-record pipeline behavior against the spy adapters.

mod common;

use campaign_sync_core::domains::contacts::{
    sync_record, RecordOutcome, SkipReason, StoreWrite, WriteStatus,
};
use campaign_sync_core::kernel::test_dependencies::{Call, MockWrite};
use campaign_sync_core::kernel::TestDependencies;
use common::{ada, alan, init_tracing};

fn synced(outcome: RecordOutcome) -> campaign_sync_core::domains::contacts::SyncReport {
    match outcome {
        RecordOutcome::Synced(report) => report,
        other => panic!("expected a synced record, got {:?}", other),
    }
}

#[tokio::test]
async fn record_without_email_produces_no_writes() {
    init_tracing();
    let record = ada();
    let mocks = TestDependencies::new().mock_enrichment(|e| e.without_email(&record.profile_url));

    let outcome = sync_record(&record, &mocks.deps()).await;

    assert_eq!(outcome, RecordOutcome::Skipped(SkipReason::NoEmail));
    assert_eq!(mocks.journal.downstream_writes(), 0);
    assert_eq!(mocks.journal.count(|c| matches!(c, Call::FindByEmail(_))), 0);
}

#[tokio::test]
async fn failed_enrichment_skips_the_record() {
    init_tracing();
    let mocks = TestDependencies::new().mock_enrichment(|e| e.failing());

    let outcome = sync_record(&ada(), &mocks.deps()).await;

    assert!(matches!(
        outcome,
        RecordOutcome::Skipped(SkipReason::EnrichmentFailed(_))
    ));
    assert_eq!(mocks.journal.downstream_writes(), 0);
}

#[tokio::test]
async fn unknown_email_creates_a_record_with_name() {
    init_tracing();
    let mocks = TestDependencies::new();

    let report = synced(sync_record(&ada(), &mocks.deps()).await);

    assert_eq!(report.email, "ada.lovelace@example.com");
    assert!(matches!(report.store, StoreWrite::Created { .. }));

    let creates = mocks.journal.creates();
    assert_eq!(creates.len(), 1);
    assert!(mocks.journal.updates().is_empty());

    let fields = &creates[0];
    assert_eq!(fields.name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(fields.email, "ada.lovelace@example.com");
    assert_eq!(fields.phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(fields.account.as_deref(), Some("Acme Corp"));
    assert_eq!(fields.company_website.as_deref(), Some("https://acme.example"));
}

#[tokio::test]
async fn known_email_updates_without_touching_the_name() {
    init_tracing();
    let mocks = TestDependencies::new()
        .mock_store(|s| s.with_contact("rec9", "Countess of Lovelace", "ada.lovelace@example.com"));

    let report = synced(sync_record(&ada(), &mocks.deps()).await);

    assert_eq!(
        report.store,
        StoreWrite::Updated {
            record_id: "rec9".into()
        }
    );
    assert!(mocks.journal.creates().is_empty());

    let updates = mocks.journal.updates();
    assert_eq!(updates.len(), 1);
    let (record_id, fields) = &updates[0];
    assert_eq!(record_id, "rec9");
    assert!(fields.name.is_none());
    assert_eq!(
        fields.linkedin.as_deref(),
        Some("https://linkedin.example/in/ada")
    );

    // The stored name survives the update
    let stored = mocks.contact_store.records();
    assert_eq!(stored[0].fields.name.as_deref(), Some("Countess of Lovelace"));
}

#[tokio::test]
async fn first_match_wins_when_email_is_duplicated() {
    init_tracing();
    let mocks = TestDependencies::new().mock_store(|s| {
        s.with_contact("recA", "Ada", "ada.lovelace@example.com")
            .with_contact("recB", "Ada L.", "ada.lovelace@example.com")
    });

    sync_record(&ada(), &mocks.deps()).await;

    let updates = mocks.journal.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "recA");
}

#[tokio::test]
async fn outreach_and_crm_run_exactly_once_per_record() {
    init_tracing();
    let mocks = TestDependencies::new();

    let report = synced(sync_record(&alan(), &mocks.deps()).await);

    assert_eq!(report.outreach, WriteStatus::Done);
    assert_eq!(report.crm, WriteStatus::Done);
    assert_eq!(mocks.journal.count(|c| matches!(c, Call::AddLead(_))), 1);
    assert_eq!(mocks.journal.count(|c| matches!(c, Call::UpsertContact(_))), 1);

    let lead = mocks
        .journal
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::AddLead(lead) => Some(lead),
            _ => None,
        })
        .unwrap();
    assert_eq!(lead.email, "alan.turing@example.com");
    assert_eq!(lead.first_name, "Alan");
    assert_eq!(lead.company_name.as_deref(), Some("Acme Corp"));
}

#[tokio::test]
async fn store_write_happens_before_outreach_and_crm() {
    init_tracing();
    let mocks = TestDependencies::new();

    sync_record(&ada(), &mocks.deps()).await;

    let journal = &mocks.journal;
    let create = journal.position(|c| matches!(c, Call::Create(_))).unwrap();
    let lead = journal.position(|c| matches!(c, Call::AddLead(_))).unwrap();
    let upsert = journal.position(|c| matches!(c, Call::UpsertContact(_))).unwrap();
    assert!(create < lead);
    assert!(create < upsert);
}

#[tokio::test]
async fn syncing_twice_creates_then_updates() {
    init_tracing();
    let mocks = TestDependencies::new();
    let deps = mocks.deps();

    let first = synced(sync_record(&ada(), &deps).await);
    let second = synced(sync_record(&ada(), &deps).await);
    let third = synced(sync_record(&ada(), &deps).await);

    let StoreWrite::Created { record_id } = first.store else {
        panic!("first sync should create");
    };
    assert_eq!(second.store, StoreWrite::Updated { record_id: record_id.clone() });
    assert_eq!(third.store, StoreWrite::Updated { record_id });

    assert_eq!(mocks.journal.creates().len(), 1);
    assert_eq!(mocks.journal.updates().len(), 2);
    assert_eq!(mocks.contact_store.records().len(), 1);
}

#[tokio::test]
async fn outreach_failure_does_not_block_crm() {
    init_tracing();
    let mocks = TestDependencies::new().mock_outreach(MockWrite::Fail);

    let report = synced(sync_record(&ada(), &mocks.deps()).await);

    assert!(matches!(report.outreach, WriteStatus::Failed(_)));
    assert_eq!(report.crm, WriteStatus::Done);
    assert!(matches!(report.store, StoreWrite::Created { .. }));
    assert_eq!(mocks.journal.count(|c| matches!(c, Call::UpsertContact(_))), 1);
}

#[tokio::test]
async fn rejected_crm_write_is_reported() {
    init_tracing();
    let mocks = TestDependencies::new().mock_crm(MockWrite::Reject);

    let report = synced(sync_record(&ada(), &mocks.deps()).await);

    assert_eq!(report.crm, WriteStatus::Rejected);
    assert_eq!(report.outreach, WriteStatus::Done);
}

#[tokio::test]
async fn store_write_failure_still_reaches_outreach_and_crm() {
    init_tracing();
    let mocks = TestDependencies::new().mock_store(|s| s.failing_writes());

    let report = synced(sync_record(&ada(), &mocks.deps()).await);

    assert!(matches!(report.store, StoreWrite::Failed(_)));
    assert_eq!(report.outreach, WriteStatus::Done);
    assert_eq!(report.crm, WriteStatus::Done);
}

#[tokio::test]
async fn lookup_failure_skips_the_store_write_only() {
    init_tracing();
    let mocks = TestDependencies::new().mock_store(|s| s.failing_lookups());

    let report = synced(sync_record(&ada(), &mocks.deps()).await);

    assert!(matches!(report.store, StoreWrite::Failed(_)));
    assert!(mocks.journal.creates().is_empty());
    assert!(mocks.journal.updates().is_empty());
    assert_eq!(mocks.journal.count(|c| matches!(c, Call::AddLead(_))), 1);
    assert_eq!(mocks.journal.count(|c| matches!(c, Call::UpsertContact(_))), 1);
}
