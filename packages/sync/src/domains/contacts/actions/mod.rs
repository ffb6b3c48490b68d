mod sync_record;

pub use sync_record::{sync_record, RecordOutcome, SkipReason, StoreWrite, SyncReport, WriteStatus};
