// LinkedIn Campaign Sync - core
//
// Syncs people who engaged with a LinkedIn post (Phantombuster) through
// enrichment (Dropcontact) into Airtable, lemlist and HubSpot.
//
// domains/ holds the contact reconciliation logic, kernel/ the adapters for
// each external system and the cycle runner.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
