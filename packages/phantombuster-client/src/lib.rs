//! Pure Phantombuster REST API client.
//!
//! Reads the latest output of an agent (e.g. a LinkedIn post commenters
//! export) and launches agents.
//!
//! # Example
//!
//! ```rust,ignore
//! use phantombuster_client::PhantombusterClient;
//!
//! let client = PhantombusterClient::new("your-api-key".into());
//! let rows = client.fetch_result_rows("1234567890").await?;
//! client.launch_agent("9876543210").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{PhantombusterError, Result};
pub use types::{AgentOutput, EngagementRow, LaunchResponse};

use types::LaunchRequest;

const BASE_URL: &str = "https://api.phantombuster.com/api/v2";

#[derive(Clone)]
pub struct PhantombusterClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl PhantombusterClient {
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

    /// Fetch the latest output of an agent.
    pub async fn fetch_output(&self, agent_id: &str) -> Result<AgentOutput> {
        let url = format!("{}/agents/fetch-output", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("X-Phantombuster-Key", &self.api_key)
            .query(&[("id", agent_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PhantombusterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Fetch an agent's output and decode its result rows.
    pub async fn fetch_result_rows(&self, agent_id: &str) -> Result<Vec<EngagementRow>> {
        let output = self.fetch_output(agent_id).await?;
        if output.is_agent_running {
            tracing::debug!(agent_id, "Agent still running, reading previous result");
        }

        let rows = parse_result_rows(&output)?;
        tracing::info!(agent_id, count = rows.len(), "Fetched agent result rows");
        Ok(rows)
    }

    /// Launch an agent. Returns the container id of the new run.
    pub async fn launch_agent(&self, agent_id: &str) -> Result<LaunchResponse> {
        let url = format!("{}/agents/launch", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("X-Phantombuster-Key", &self.api_key)
            .json(&LaunchRequest { id: agent_id })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PhantombusterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let launched: LaunchResponse = resp.json().await?;
        tracing::info!(agent_id, container_id = %launched.container_id, "Agent launched");
        Ok(launched)
    }
}

/// Decode the `resultObject` string of an agent output.
///
/// An agent that has never produced a result yields no rows.
pub fn parse_result_rows(output: &AgentOutput) -> Result<Vec<EngagementRow>> {
    match output.result_object.as_deref().map(str::trim) {
        None | Some("") | Some("null") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| PhantombusterError::Parse(format!("invalid resultObject: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_with(result_object: Option<&str>) -> AgentOutput {
        AgentOutput {
            status: Some("finished".into()),
            is_agent_running: false,
            result_object: result_object.map(String::from),
        }
    }

    #[test]
    fn test_parse_rows_accepts_both_profile_keys() {
        let output = output_with(Some(
            r#"[{"firstName":"Ada","lastName":"Lovelace","profileUrl":"https://linkedin.example/ada"},
                {"firstName":"Alan","lastName":"Turing","profileLink":"https://linkedin.example/alan"}]"#,
        ));

        let rows = parse_result_rows(&output).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].profile_url, "https://linkedin.example/ada");
        assert_eq!(rows[1].profile_url, "https://linkedin.example/alan");
    }

    #[test]
    fn test_parse_rows_missing_names_default_to_empty() {
        let output = output_with(Some(r#"[{"profileUrl":"https://linkedin.example/x"}]"#));
        let rows = parse_result_rows(&output).unwrap();
        assert_eq!(rows[0].first_name, "");
        assert_eq!(rows[0].last_name, "");
    }

    #[test]
    fn test_parse_rows_without_result() {
        assert!(parse_result_rows(&output_with(None)).unwrap().is_empty());
        assert!(parse_result_rows(&output_with(Some("null"))).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rows_rejects_garbage() {
        let err = parse_result_rows(&output_with(Some("not json"))).unwrap_err();
        assert!(matches!(err, PhantombusterError::Parse(_)));
    }

    #[test]
    fn test_agent_output_deserializes_camel_case() {
        let output: AgentOutput = serde_json::from_str(
            r#"{"status":"running","isAgentRunning":true,"resultObject":"[]","output":"log"}"#,
        )
        .unwrap();
        assert!(output.is_agent_running);
        assert_eq!(output.result_object.as_deref(), Some("[]"));
    }
}
