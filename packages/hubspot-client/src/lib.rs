//! Pure HubSpot CRM REST API client.
//!
//! Upserts contacts keyed by email through the batch upsert endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use hubspot_client::{HubspotClient, Properties};
//!
//! let client = HubspotClient::new("pat-na1-...".into());
//! let mut properties = Properties::new();
//! properties.insert("firstname".into(), "Ada".into());
//! let contact = client.upsert_contact_by_email("ada@example.com", properties).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{HubspotError, Result};
pub use types::{BatchUpsertRequest, BatchUpsertResponse, ContactObject, Properties, UpsertInput};

const BASE_URL: &str = "https://api.hubapi.com";

#[derive(Clone)]
pub struct HubspotClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl HubspotClient {
    pub fn new(access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (proxy or test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn batch_upsert_contacts(
        &self,
        request: &BatchUpsertRequest,
    ) -> Result<BatchUpsertResponse> {
        let url = format!("{}/crm/v3/objects/contacts/batch/upsert", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HubspotError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Create or update a single contact identified by its email.
    pub async fn upsert_contact_by_email(
        &self,
        email: &str,
        properties: Properties,
    ) -> Result<ContactObject> {
        let request = upsert_by_email(email, properties);
        let response = self.batch_upsert_contacts(&request).await?;

        let contact = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| HubspotError::EmptyResult(email.to_string()))?;

        tracing::debug!(contact_id = %contact.id, created = contact.new, "HubSpot contact upserted");
        Ok(contact)
    }
}

/// Build a one-contact upsert request keyed on the `email` property.
pub fn upsert_by_email(email: &str, mut properties: Properties) -> BatchUpsertRequest {
    properties.insert("email".to_string(), email.to_string());
    BatchUpsertRequest {
        inputs: vec![UpsertInput {
            id_property: "email".to_string(),
            id: email.to_string(),
            properties,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_by_email_shape() {
        let mut properties = Properties::new();
        properties.insert("firstname".into(), "Grace".into());

        let json = serde_json::to_value(upsert_by_email("grace@example.com", properties)).unwrap();
        let input = &json["inputs"][0];
        assert_eq!(input["idProperty"], "email");
        assert_eq!(input["id"], "grace@example.com");
        assert_eq!(input["properties"]["email"], "grace@example.com");
        assert_eq!(input["properties"]["firstname"], "Grace");
    }

    #[test]
    fn test_batch_response_parses() {
        let response: BatchUpsertResponse = serde_json::from_str(
            r#"{"status":"COMPLETE","results":[{"id":"512","new":true,"properties":{"email":"grace@example.com"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.results[0].id, "512");
        assert!(response.results[0].new);
    }
}
