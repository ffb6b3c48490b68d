use anyhow::{Context, Result};
use async_trait::async_trait;
use lemlist_client::{LeadInput, LemlistClient};
use tracing::info;

use super::BaseOutreachService;
use crate::domains::contacts::models::OutreachLead;

enum Backend {
    Live {
        client: LemlistClient,
        campaign_id: Option<String>,
    },
    Simulated,
}

/// lemlist implementation of BaseOutreachService
pub struct LemlistOutreach {
    backend: Backend,
}

impl LemlistOutreach {
    pub fn live(client: LemlistClient, campaign_id: Option<String>) -> Self {
        Self {
            backend: Backend::Live {
                client,
                campaign_id,
            },
        }
    }

    pub fn simulated() -> Self {
        Self {
            backend: Backend::Simulated,
        }
    }
}

fn to_input(lead: &OutreachLead) -> LeadInput {
    LeadInput {
        first_name: Some(lead.first_name.clone()).filter(|s| !s.is_empty()),
        last_name: Some(lead.last_name.clone()).filter(|s| !s.is_empty()),
        company_name: lead.company_name.clone().filter(|s| !s.is_empty()),
    }
}

#[async_trait]
impl BaseOutreachService for LemlistOutreach {
    async fn add_lead(&self, lead: &OutreachLead) -> Result<bool> {
        match &self.backend {
            Backend::Live {
                client,
                campaign_id,
            } => {
                let campaign_id = campaign_id
                    .as_deref()
                    .context("LEMLIST_CAMPAIGN_ID is not configured")?;

                client
                    .add_lead_to_campaign(campaign_id, &lead.email, &to_input(lead))
                    .await
                    .with_context(|| format!("Failed to add {} to lemlist", lead.email))?;

                info!(system = "lemlist", email = %lead.email, campaign_id, "Lead added");
                Ok(true)
            }
            Backend::Simulated => {
                info!(system = "lemlist", email = %lead.email, "Simulated add lead");
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> OutreachLead {
        OutreachLead {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "".into(),
            company_name: Some("Example Ltd".into()),
        }
    }

    #[tokio::test]
    async fn test_simulated_add_lead() {
        assert!(LemlistOutreach::simulated().add_lead(&lead()).await.unwrap());
    }

    #[tokio::test]
    async fn test_live_without_campaign_fails() {
        let client = LemlistClient::new("key".into()).with_base_url("http://127.0.0.1:9");
        let outreach = LemlistOutreach::live(client, None);

        let err = outreach.add_lead(&lead()).await.unwrap_err();
        assert!(err.to_string().contains("LEMLIST_CAMPAIGN_ID"));
    }

    #[test]
    fn test_empty_names_are_not_sent() {
        let input = to_input(&lead());
        assert_eq!(input.first_name.as_deref(), Some("Ada"));
        assert!(input.last_name.is_none());
    }
}
