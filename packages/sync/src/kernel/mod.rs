//! Kernel module - adapters for the external systems and the run loop.

pub mod airtable_store;
pub mod deps;
pub mod dropcontact_enricher;
pub mod hubspot_crm;
pub mod lemlist_outreach;
pub mod phantombuster_feed;
pub mod runner;
pub mod test_dependencies;
pub mod traits;

pub use airtable_store::AirtableStore;
pub use deps::SyncDeps;
pub use dropcontact_enricher::DropcontactEnricher;
pub use hubspot_crm::HubspotCrm;
pub use lemlist_outreach::LemlistOutreach;
pub use phantombuster_feed::{PhantomAgents, PhantombusterFeed};
pub use runner::{CycleReport, CycleRunner, CycleRunnerConfig, CycleState};
pub use test_dependencies::TestDependencies;
pub use traits::*;
