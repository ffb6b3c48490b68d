use serde::{Deserialize, Serialize};

/// Response of `GET /agents/fetch-output`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOutput {
    pub status: Option<String>,
    #[serde(default)]
    pub is_agent_running: bool,
    /// JSON-encoded array of result rows, absent until the agent has produced one.
    pub result_object: Option<String>,
}

/// One person row from a post commenters/likers export.
///
/// Phantombuster phantoms are not consistent about the profile URL key, so
/// both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRow {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, alias = "profileLink", alias = "linkedinProfileUrl")]
    pub profile_url: String,
}

/// Body of `POST /agents/launch`.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchRequest<'a> {
    pub id: &'a str,
}

/// Response of `POST /agents/launch`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    pub container_id: String,
}
