pub mod actions;
pub mod models;
pub mod reconcile;

// Re-export commonly used types
pub use actions::{sync_record, RecordOutcome, SkipReason, StoreWrite, SyncReport, WriteStatus};
pub use models::{
    ContactFields, ContactRecord, CrmContact, EmailAddress, EnrichedProfile, OutreachLead,
    RawEngagementRecord,
};
pub use reconcile::{plan_record, RecordPlan, StoreLookup, StoreOp};
