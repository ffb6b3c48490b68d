//! Pure lemlist REST API client.
//!
//! Only the lead insertion endpoint is covered.
//!
//! # Example
//!
//! ```rust,ignore
//! use lemlist_client::{LeadInput, LemlistClient};
//!
//! let client = LemlistClient::new("your-api-key".into());
//! client
//!     .add_lead_to_campaign("cam_123", "ada@example.com", &LeadInput::default())
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{LemlistError, Result};
pub use types::{Lead, LeadInput};

const BASE_URL: &str = "https://api.lemlist.com/api";

#[derive(Clone)]
pub struct LemlistClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl LemlistClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (proxy or test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn lead_url(&self, campaign_id: &str, email: &str) -> String {
        format!(
            "{}/campaigns/{}/leads/{}",
            self.base_url,
            urlencoding::encode(campaign_id),
            urlencoding::encode(email)
        )
    }

    /// Add a lead to a campaign. lemlist rejects duplicates within a campaign
    /// with a 400, which surfaces as [`LemlistError::Api`].
    pub async fn add_lead_to_campaign(
        &self,
        campaign_id: &str,
        email: &str,
        lead: &LeadInput,
    ) -> Result<Lead> {
        let resp = self
            .client
            .post(self.lead_url(campaign_id, email))
            // lemlist uses basic auth with an empty user name
            .basic_auth("", Some(&self.api_key))
            .json(lead)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LemlistError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let created: Lead = resp.json().await?;
        tracing::debug!(campaign_id, lead_id = ?created.id, "Lead added to lemlist campaign");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_url_encodes_email() {
        let client = LemlistClient::new("key".into()).with_base_url("http://localhost:1");
        assert_eq!(
            client.lead_url("cam_1", "ada+test@example.com"),
            "http://localhost:1/campaigns/cam_1/leads/ada%2Btest%40example.com"
        );
    }

    #[test]
    fn test_lead_input_camel_case() {
        let lead = LeadInput {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            company_name: None,
        };
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert!(json.get("companyName").is_none());
    }
}
