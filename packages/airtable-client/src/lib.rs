//! Pure Airtable REST API client.
//!
//! Record operations against a single table. Field types are supplied by the
//! caller so each table can have its own typed row struct.
//!
//! # Example
//!
//! ```rust,ignore
//! use airtable_client::AirtableClient;
//!
//! let client = AirtableClient::new("pat...".into(), "appXXXX".into(), "Contacts".into());
//! let matches = client
//!     .list_records::<serde_json::Value>(&AirtableClient::field_equals("Email", "ada@example.com"))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{AirtableError, Result};
pub use types::{ListResponse, Record};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::FieldsBody;

const BASE_URL: &str = "https://api.airtable.com/v0";

#[derive(Clone)]
pub struct AirtableClient {
    client: reqwest::Client,
    api_key: String,
    base_id: String,
    table: String,
    base_url: String,
}

impl AirtableClient {
    pub fn new(api_key: String, base_id: String, table: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_id,
            table,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (proxy or test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.base_id,
            urlencoding::encode(&self.table)
        )
    }

    /// Build a `{Field}='value'` formula with the value escaped.
    pub fn field_equals(field: &str, value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
        format!("{{{}}}='{}'", field, escaped)
    }

    /// List the first page of records matching a formula.
    pub async fn list_records<F: DeserializeOwned>(&self, formula: &str) -> Result<Vec<Record<F>>> {
        let resp = self
            .client
            .get(self.table_url())
            .bearer_auth(&self.api_key)
            .query(&[("filterByFormula", formula)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let list: ListResponse<F> = resp.json().await?;
        tracing::debug!(
            table = %self.table,
            count = list.records.len(),
            more = list.offset.is_some(),
            "Listed Airtable records"
        );
        Ok(list.records)
    }

    pub async fn create_record<F>(&self, fields: &F) -> Result<Record<F>>
    where
        F: Serialize + DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.table_url())
            .bearer_auth(&self.api_key)
            .json(&FieldsBody { fields })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// PATCH a record: only the supplied fields are written.
    pub async fn update_record<F>(&self, record_id: &str, fields: &F) -> Result<Record<F>>
    where
        F: Serialize + DeserializeOwned,
    {
        let url = format!("{}/{}", self.table_url(), record_id);
        let resp = self
            .client
            .patch(&url)
            .bearer_auth(&self.api_key)
            .json(&FieldsBody { fields })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_equals_plain() {
        assert_eq!(
            AirtableClient::field_equals("Email", "ada@example.com"),
            "{Email}='ada@example.com'"
        );
    }

    #[test]
    fn test_field_equals_escapes_quotes() {
        assert_eq!(
            AirtableClient::field_equals("Email", "o'brien@example.com"),
            r"{Email}='o\'brien@example.com'"
        );
        assert_eq!(AirtableClient::field_equals("Email", r"a\b"), r"{Email}='a\\b'");
    }

    #[test]
    fn test_table_url_encodes_table_name() {
        let client = AirtableClient::new("key".into(), "appBase".into(), "Sales Contacts".into())
            .with_base_url("http://localhost:9999");
        assert_eq!(client.table_url(), "http://localhost:9999/appBase/Sales%20Contacts");
    }

    #[test]
    fn test_list_response_parses() {
        let list: ListResponse<serde_json::Value> = serde_json::from_str(
            r#"{"records":[{"id":"rec1","createdTime":"2024-01-01T00:00:00.000Z","fields":{"Email":"a@b.c"}}]}"#,
        )
        .unwrap();
        assert_eq!(list.records[0].id, "rec1");
        assert_eq!(list.records[0].fields["Email"], "a@b.c");
        assert!(list.offset.is_none());
    }
}
