use anyhow::{Context, Result};
use async_trait::async_trait;
use hubspot_client::{HubspotClient, Properties};
use tracing::info;

use super::BaseCrmService;
use crate::domains::contacts::models::CrmContact;

/// HubSpot implementation of BaseCrmService
pub struct HubspotCrm {
    client: Option<HubspotClient>,
}

impl HubspotCrm {
    pub fn live(client: HubspotClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn simulated() -> Self {
        Self { client: None }
    }
}

/// Map a contact onto HubSpot's default contact properties.
///
/// Empty values are left out so they do not blank existing CRM data.
pub fn to_properties(contact: &CrmContact) -> Properties {
    let candidates = [
        ("firstname", Some(&contact.first_name)),
        ("lastname", Some(&contact.last_name)),
        ("company", contact.company.as_ref()),
        ("phone", contact.phone.as_ref()),
    ];

    candidates
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
}

#[async_trait]
impl BaseCrmService for HubspotCrm {
    async fn upsert_contact(&self, contact: &CrmContact) -> Result<bool> {
        let Some(client) = &self.client else {
            info!(system = "hubspot", email = %contact.email, "Simulated upsert contact");
            return Ok(true);
        };

        let upserted = client
            .upsert_contact_by_email(&contact.email, to_properties(contact))
            .await
            .with_context(|| format!("Failed to upsert {} into HubSpot", contact.email))?;

        info!(
            system = "hubspot",
            email = %contact.email,
            contact_id = %upserted.id,
            created = upserted.new,
            "Contact upserted"
        );
        Ok(true)
    }
}
