// Trait definitions for dependency injection
//
// One trait per external system, carrying only the operations the contact
// pipeline uses. Live and simulated implementations live next to each other in
// kernel/, spies for tests in kernel/test_dependencies.rs.
//
// Naming convention: Base* for trait names (e.g., BaseContactStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::contacts::models::{
    ContactFields, ContactRecord, CrmContact, EnrichedProfile, OutreachLead, RawEngagementRecord,
};

// =============================================================================
// Engagement Feed Trait (Phantombuster)
// =============================================================================

#[async_trait]
pub trait BaseEngagementFeed: Send + Sync {
    /// People who commented on the tracked post
    async fn fetch_commenters(&self) -> Result<Vec<RawEngagementRecord>>;

    /// People who liked the tracked post
    async fn fetch_likers(&self) -> Result<Vec<RawEngagementRecord>>;

    /// Kick off the follow-up automation. Returns false if nothing was triggered.
    async fn trigger_next(&self) -> Result<bool>;
}

// =============================================================================
// Enrichment Trait (Dropcontact)
// =============================================================================

#[async_trait]
pub trait BaseEnrichmentService: Send + Sync {
    /// Best-effort enrichment. A person that cannot be identified comes back
    /// with no emails rather than as an error.
    async fn enrich(&self, record: &RawEngagementRecord) -> Result<EnrichedProfile>;
}

// =============================================================================
// Contact Store Trait (Airtable)
// =============================================================================

#[async_trait]
pub trait BaseContactStore: Send + Sync {
    /// Records whose Email equals `email`, in store order
    async fn find_by_email(&self, email: &str) -> Result<Vec<ContactRecord>>;

    async fn create(&self, fields: &ContactFields) -> Result<ContactRecord>;

    /// Overwrite the given fields of an existing record
    async fn update(&self, record_id: &str, fields: &ContactFields) -> Result<ContactRecord>;
}

// =============================================================================
// Outreach Trait (lemlist)
// =============================================================================

#[async_trait]
pub trait BaseOutreachService: Send + Sync {
    async fn add_lead(&self, lead: &OutreachLead) -> Result<bool>;
}

// =============================================================================
// CRM Trait (HubSpot)
// =============================================================================

#[async_trait]
pub trait BaseCrmService: Send + Sync {
    /// Create or update the contact keyed by its email
    async fn upsert_contact(&self, contact: &CrmContact) -> Result<bool>;
}
