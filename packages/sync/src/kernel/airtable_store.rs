use airtable_client::{AirtableClient, Record};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::BaseContactStore;
use crate::domains::contacts::models::{ContactFields, ContactRecord};

const EMAIL_COLUMN: &str = "Email";

/// Id of the record every simulated lookup matches.
pub const SIMULATED_EXISTING_ID: &str = "rec123";
/// Id assigned to simulated creates.
pub const SIMULATED_CREATED_ID: &str = "rec_new";

/// Airtable implementation of BaseContactStore
pub struct AirtableStore {
    client: Option<AirtableClient>,
}

impl AirtableStore {
    pub fn live(client: AirtableClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Every email matches `rec123` unless it contains "new".
    pub fn simulated() -> Self {
        Self { client: None }
    }
}

fn to_contact(record: Record<ContactFields>) -> ContactRecord {
    ContactRecord {
        id: record.id,
        fields: record.fields,
    }
}

#[async_trait]
impl BaseContactStore for AirtableStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<ContactRecord>> {
        let Some(client) = &self.client else {
            info!(system = "airtable", email, "Simulated search");
            if email.contains("new") {
                return Ok(Vec::new());
            }
            return Ok(vec![ContactRecord {
                id: SIMULATED_EXISTING_ID.to_string(),
                fields: ContactFields {
                    email: email.to_string(),
                    ..Default::default()
                },
            }]);
        };

        let formula = AirtableClient::field_equals(EMAIL_COLUMN, email);
        let records = client
            .list_records::<ContactFields>(&formula)
            .await
            .with_context(|| format!("Failed to search {} for {}", client.table(), email))?;

        Ok(records.into_iter().map(to_contact).collect())
    }

    async fn create(&self, fields: &ContactFields) -> Result<ContactRecord> {
        let Some(client) = &self.client else {
            info!(system = "airtable", fields = ?fields, "Simulated create");
            return Ok(ContactRecord {
                id: SIMULATED_CREATED_ID.to_string(),
                fields: fields.clone(),
            });
        };

        let record = client
            .create_record(fields)
            .await
            .context("Failed to create Airtable record")?;
        Ok(to_contact(record))
    }

    async fn update(&self, record_id: &str, fields: &ContactFields) -> Result<ContactRecord> {
        let Some(client) = &self.client else {
            info!(system = "airtable", record_id, fields = ?fields, "Simulated update");
            return Ok(ContactRecord {
                id: record_id.to_string(),
                fields: fields.clone(),
            });
        };

        let record = client
            .update_record(record_id, fields)
            .await
            .with_context(|| format!("Failed to update Airtable record {}", record_id))?;
        Ok(to_contact(record))
    }
}
