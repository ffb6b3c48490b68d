pub mod contact;
pub mod engagement;

pub use contact::{ContactFields, ContactRecord, CrmContact, OutreachLead};
pub use engagement::{EmailAddress, EnrichedProfile, RawEngagementRecord};
