//! Pure Dropcontact REST API client.
//!
//! Dropcontact enrichment is asynchronous: a batch is submitted, then polled
//! until the results are ready.
//!
//! # Example
//!
//! ```rust,ignore
//! use dropcontact_client::{ContactInput, DropcontactClient};
//!
//! let client = DropcontactClient::new("your-access-token".into());
//! let contacts = client
//!     .enrich(vec![ContactInput {
//!         first_name: Some("Ada".into()),
//!         last_name: Some("Lovelace".into()),
//!         linkedin: Some("https://www.linkedin.com/in/ada".into()),
//!     }])
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{DropcontactError, Result};
pub use types::{BatchRequest, BatchResult, BatchSubmitted, ContactInput, EmailEntry, EnrichedContact};

use std::time::Duration;

const BASE_URL: &str = "https://api.dropcontact.io";

/// How long to keep polling a submitted batch.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(6),
        }
    }
}

#[derive(Clone)]
pub struct DropcontactClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    poll: PollPolicy,
}

impl DropcontactClient {
    pub fn new(access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            base_url: BASE_URL.to_string(),
            poll: PollPolicy::default(),
        }
    }

    /// Point the client at a different host (proxy or test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Submit a batch. Returns the request id to poll.
    pub async fn submit_batch(&self, request: &BatchRequest) -> Result<String> {
        let url = format!("{}/batch", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("X-Access-Token", &self.access_token)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DropcontactError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let submitted: BatchSubmitted = resp.json().await?;
        match submitted.request_id {
            Some(request_id) if submitted.success && !submitted.error => {
                tracing::debug!(
                    request_id = %request_id,
                    credits_left = ?submitted.credits_left,
                    "Dropcontact batch submitted"
                );
                Ok(request_id)
            }
            _ => Err(DropcontactError::Rejected(
                submitted.reason.unwrap_or_else(|| "no request id returned".into()),
            )),
        }
    }

    /// Fetch the current state of a batch.
    pub async fn get_batch(&self, request_id: &str) -> Result<BatchResult> {
        let url = format!("{}/batch/{}", self.base_url, request_id);
        let resp = self
            .client
            .get(&url)
            .header("X-Access-Token", &self.access_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DropcontactError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Poll a batch until it is ready or the poll policy is exhausted.
    pub async fn wait_for_batch(&self, request_id: &str) -> Result<Vec<EnrichedContact>> {
        for attempt in 1..=self.poll.max_attempts {
            let result = self.get_batch(request_id).await?;
            if result.error {
                return Err(DropcontactError::Rejected(
                    result.reason.unwrap_or_else(|| "batch failed".into()),
                ));
            }
            if result.success {
                return Ok(result.data);
            }

            tracing::debug!(
                request_id,
                attempt,
                reason = ?result.reason,
                "Dropcontact batch not ready"
            );
            if attempt < self.poll.max_attempts {
                tokio::time::sleep(self.poll.interval).await;
            }
        }

        Err(DropcontactError::NotReady {
            request_id: request_id.to_string(),
            attempts: self.poll.max_attempts,
        })
    }

    /// Submit contacts and wait for their enrichment.
    pub async fn enrich(&self, contacts: Vec<ContactInput>) -> Result<Vec<EnrichedContact>> {
        let request = BatchRequest::new(contacts);
        let request_id = self.submit_batch(&request).await?;
        self.wait_for_batch(&request_id).await
    }
}
