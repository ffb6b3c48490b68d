//! Sync dependencies (using traits for testability)
//!
//! This module provides the dependency container handed to the contact
//! pipeline and the cycle runner. Every external system sits behind a trait
//! object, built live or simulated from [`Config`].

use std::sync::Arc;

use airtable_client::AirtableClient;
use dropcontact_client::DropcontactClient;
use hubspot_client::HubspotClient;
use lemlist_client::LemlistClient;
use phantombuster_client::PhantombusterClient;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::{Config, RequestedMode, RunMode};
use crate::kernel::{
    AirtableStore, BaseContactStore, BaseCrmService, BaseEngagementFeed, BaseEnrichmentService,
    BaseOutreachService, DropcontactEnricher, HubspotCrm, LemlistOutreach, PhantomAgents,
    PhantombusterFeed,
};

/// Dependencies of the contact pipeline
#[derive(Clone)]
pub struct SyncDeps {
    pub feed: Arc<dyn BaseEngagementFeed>,
    pub enrichment: Arc<dyn BaseEnrichmentService>,
    pub contact_store: Arc<dyn BaseContactStore>,
    pub outreach: Arc<dyn BaseOutreachService>,
    pub crm: Arc<dyn BaseCrmService>,
}

impl SyncDeps {
    pub fn new(
        feed: Arc<dyn BaseEngagementFeed>,
        enrichment: Arc<dyn BaseEnrichmentService>,
        contact_store: Arc<dyn BaseContactStore>,
        outreach: Arc<dyn BaseOutreachService>,
        crm: Arc<dyn BaseCrmService>,
    ) -> Self {
        Self {
            feed,
            enrichment,
            contact_store,
            outreach,
            crm,
        }
    }

    /// Every adapter in simulated mode: fixed sample data, no network.
    pub fn simulated() -> Self {
        Self::new(
            Arc::new(PhantombusterFeed::simulated()),
            Arc::new(DropcontactEnricher::simulated()),
            Arc::new(AirtableStore::simulated()),
            Arc::new(LemlistOutreach::simulated()),
            Arc::new(HubspotCrm::simulated()),
        )
    }

    /// Build adapters for the mode the configuration resolves to.
    ///
    /// A missing credential never fails startup; it switches every adapter to
    /// simulated mode.
    pub fn from_config(config: &Config) -> Self {
        let credentials = match (config.run_mode(), config.live_credentials()) {
            (RunMode::Live, Some(credentials)) => credentials,
            _ => {
                if config.requested_mode == RequestedMode::Live {
                    warn!(
                        missing = ?config.missing_credentials(),
                        "Live mode requested but credentials are missing"
                    );
                }
                info!(mode = "simulated", "Adapters running on simulated data");
                return Self::simulated();
            }
        };

        info!(mode = "live", table = %config.airtable_table, "Adapters running against live APIs");

        let feed = PhantombusterFeed::live(
            PhantombusterClient::new(
                credentials.phantombuster_api_key.expose_secret().to_string(),
            ),
            PhantomAgents {
                commenters: config.phantombuster_commenters_agent_id.clone(),
                likers: config.phantombuster_likers_agent_id.clone(),
                next: config.phantombuster_next_agent_id.clone(),
            },
        );
        let enrichment = DropcontactEnricher::live(DropcontactClient::new(
            credentials.dropcontact_api_key.expose_secret().to_string(),
        ));
        let contact_store = AirtableStore::live(AirtableClient::new(
            credentials.airtable_api_key.expose_secret().to_string(),
            credentials.airtable_base_id.clone(),
            config.airtable_table.clone(),
        ));
        let outreach = LemlistOutreach::live(
            LemlistClient::new(credentials.lemlist_api_key.expose_secret().to_string()),
            config.lemlist_campaign_id.clone(),
        );
        let crm = HubspotCrm::live(HubspotClient::new(
            credentials.hubspot_api_key.expose_secret().to_string(),
        ));

        Self::new(
            Arc::new(feed),
            Arc::new(enrichment),
            Arc::new(contact_store),
            Arc::new(outreach),
            Arc::new(crm),
        )
    }
}
