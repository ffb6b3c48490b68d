use anyhow::Result;
use async_trait::async_trait;
use dropcontact_client::{ContactInput, DropcontactClient, EnrichedContact};
use tracing::{debug, warn};

use super::BaseEnrichmentService;
use crate::domains::contacts::models::{EmailAddress, EnrichedProfile, RawEngagementRecord};

const SIMULATED_COMPANY: &str = "Example Ltd";
const SIMULATED_WEBSITE: &str = "https://example.com";

/// Dropcontact implementation of BaseEnrichmentService
pub struct DropcontactEnricher {
    client: Option<DropcontactClient>,
}

impl DropcontactEnricher {
    pub fn live(client: DropcontactClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Deterministic `<first>@example.com` profiles, no network calls.
    pub fn simulated() -> Self {
        Self { client: None }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Merge a Dropcontact result over what the raw record already knew.
fn to_profile(record: &RawEngagementRecord, contact: EnrichedContact) -> EnrichedProfile {
    let base = EnrichedProfile::unresolved(record);

    EnrichedProfile {
        full_name: contact.full_name.unwrap_or(base.full_name),
        first_name: contact.first_name.unwrap_or(base.first_name),
        last_name: contact.last_name.unwrap_or(base.last_name),
        emails: contact
            .email
            .into_iter()
            .map(|e| EmailAddress { email: e.email })
            .collect(),
        phone: contact.phone,
        linkedin_url: contact.linkedin.unwrap_or(base.linkedin_url),
        company: contact.company,
        website: contact.website,
    }
}

pub fn simulated_profile(record: &RawEngagementRecord) -> EnrichedProfile {
    let emails = non_empty(&record.first_name)
        .map(|first| {
            vec![EmailAddress {
                email: format!("{}@example.com", first.to_lowercase()),
            }]
        })
        .unwrap_or_default();

    EnrichedProfile {
        full_name: format!("{} {}", record.first_name, record.last_name),
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        emails,
        phone: Some(String::new()),
        linkedin_url: record.profile_url.clone(),
        company: Some(SIMULATED_COMPANY.to_string()),
        website: Some(SIMULATED_WEBSITE.to_string()),
    }
}

#[async_trait]
impl BaseEnrichmentService for DropcontactEnricher {
    async fn enrich(&self, record: &RawEngagementRecord) -> Result<EnrichedProfile> {
        let Some(client) = &self.client else {
            return Ok(simulated_profile(record));
        };

        let input = ContactInput {
            first_name: non_empty(&record.first_name),
            last_name: non_empty(&record.last_name),
            linkedin: non_empty(&record.profile_url),
        };

        // Transient failures degrade to an unresolved profile so the batch goes on
        match client.enrich(vec![input]).await {
            Ok(contacts) => match contacts.into_iter().next() {
                Some(contact) => Ok(to_profile(record, contact)),
                None => {
                    debug!(profile_url = %record.profile_url, "Dropcontact returned no contact");
                    Ok(EnrichedProfile::unresolved(record))
                }
            },
            Err(e) => {
                warn!(
                    profile_url = %record.profile_url,
                    error = %e,
                    "Dropcontact enrichment failed"
                );
                Ok(EnrichedProfile::unresolved(record))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_enrichment() {
        let enricher = DropcontactEnricher::simulated();
        let record = RawEngagementRecord::new("Ada", "Lovelace", "https://linkedin.example/ada");

        let profile = enricher.enrich(&record).await.unwrap();
        assert_eq!(profile.primary_email(), Some("ada@example.com"));
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.linkedin_url, "https://linkedin.example/ada");
        assert_eq!(profile.company.as_deref(), Some("Example Ltd"));
        assert_eq!(profile.website.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_simulated_blank_first_name_has_no_email() {
        let enricher = DropcontactEnricher::simulated();
        let record = RawEngagementRecord::new("", "Anonymous", "https://linkedin.example/anon");

        let profile = enricher.enrich(&record).await.unwrap();
        assert!(profile.primary_email().is_none());
    }

    #[test]
    fn test_to_profile_falls_back_to_raw_identity() {
        let record = RawEngagementRecord::new("Alan", "Turing", "https://linkedin.example/alan");
        let contact = EnrichedContact {
            email: vec![dropcontact_client::EmailEntry {
                email: "alan@bletchley.example".into(),
                qualification: Some("nominative@pro".into()),
            }],
            company: Some("Bletchley Park".into()),
            ..Default::default()
        };

        let profile = to_profile(&record, contact);
        assert_eq!(profile.full_name, "Alan Turing");
        assert_eq!(profile.linkedin_url, "https://linkedin.example/alan");
        assert_eq!(profile.primary_email(), Some("alan@bletchley.example"));
        assert_eq!(profile.company.as_deref(), Some("Bletchley Park"));
        assert!(profile.phone.is_none());
    }
}
