use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

const DEFAULT_AIRTABLE_TABLE: &str = "Contacts";
const DEFAULT_PACING_SECONDS: u64 = 30;

/// Mode requested through `SYNC_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestedMode {
    /// Live when every credential is present, simulated otherwise
    #[default]
    Auto,
    Live,
    Simulated,
}

impl FromStr for RequestedMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "live" => Ok(Self::Live),
            "simulated" | "mock" => Ok(Self::Simulated),
            other => anyhow::bail!(
                "unknown sync mode '{}' (expected auto, live or simulated)",
                other
            ),
        }
    }
}

/// Mode the adapters are actually built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Live,
    Simulated,
}

/// Credentials required for live mode, all present.
#[derive(Debug, Clone)]
pub struct LiveCredentials {
    pub phantombuster_api_key: SecretString,
    pub dropcontact_api_key: SecretString,
    pub airtable_api_key: SecretString,
    pub airtable_base_id: String,
    pub lemlist_api_key: SecretString,
    pub hubspot_api_key: SecretString,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub phantombuster_api_key: Option<SecretString>,
    pub phantombuster_commenters_agent_id: Option<String>,
    pub phantombuster_likers_agent_id: Option<String>,
    pub phantombuster_next_agent_id: Option<String>,
    pub dropcontact_api_key: Option<SecretString>,
    pub airtable_api_key: Option<SecretString>,
    pub airtable_base_id: Option<String>,
    pub airtable_table: String,
    pub lemlist_api_key: Option<SecretString>,
    pub lemlist_campaign_id: Option<String>,
    pub hubspot_api_key: Option<SecretString>,
    pub requested_mode: RequestedMode,
    /// Wait between fetching commenters and processing them
    pub pacing_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let secret = |key: &str| var(key).map(SecretString::from);

        let requested_mode = match var("SYNC_MODE") {
            Some(mode) => mode.parse().context("SYNC_MODE is invalid")?,
            None => RequestedMode::default(),
        };

        let pacing_seconds = match var("SYNC_PACING_SECONDS") {
            Some(secs) => secs
                .parse::<u64>()
                .context("SYNC_PACING_SECONDS must be a whole number of seconds")?,
            None => DEFAULT_PACING_SECONDS,
        };

        Ok(Self {
            phantombuster_api_key: secret("PHANTOMBUSTER_API_KEY"),
            phantombuster_commenters_agent_id: var("PHANTOMBUSTER_COMMENTERS_AGENT_ID"),
            phantombuster_likers_agent_id: var("PHANTOMBUSTER_LIKERS_AGENT_ID"),
            phantombuster_next_agent_id: var("PHANTOMBUSTER_NEXT_AGENT_ID"),
            dropcontact_api_key: secret("DROPCONTACT_API_KEY"),
            airtable_api_key: secret("AIRTABLE_API_KEY"),
            airtable_base_id: var("AIRTABLE_BASE_ID"),
            airtable_table: var("AIRTABLE_TABLE")
                .unwrap_or_else(|| DEFAULT_AIRTABLE_TABLE.to_string()),
            lemlist_api_key: secret("LEMLIST_API_KEY"),
            lemlist_campaign_id: var("LEMLIST_CAMPAIGN_ID"),
            hubspot_api_key: secret("HUBSPOT_API_KEY"),
            requested_mode,
            pacing_delay: Duration::from_secs(pacing_seconds),
        })
    }

    /// Names of the live-mode variables that are not set.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let required = [
            ("PHANTOMBUSTER_API_KEY", self.phantombuster_api_key.is_some()),
            ("DROPCONTACT_API_KEY", self.dropcontact_api_key.is_some()),
            ("AIRTABLE_API_KEY", self.airtable_api_key.is_some()),
            ("AIRTABLE_BASE_ID", self.airtable_base_id.is_some()),
            ("LEMLIST_API_KEY", self.lemlist_api_key.is_some()),
            ("HUBSPOT_API_KEY", self.hubspot_api_key.is_some()),
        ];

        required
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }

    /// All live credentials, or `None` if any is missing.
    pub fn live_credentials(&self) -> Option<LiveCredentials> {
        Some(LiveCredentials {
            phantombuster_api_key: self.phantombuster_api_key.clone()?,
            dropcontact_api_key: self.dropcontact_api_key.clone()?,
            airtable_api_key: self.airtable_api_key.clone()?,
            airtable_base_id: self.airtable_base_id.clone()?,
            lemlist_api_key: self.lemlist_api_key.clone()?,
            hubspot_api_key: self.hubspot_api_key.clone()?,
        })
    }

    /// Resolve the mode: live only when requested (or auto) and fully configured.
    pub fn run_mode(&self) -> RunMode {
        match self.requested_mode {
            RequestedMode::Simulated => RunMode::Simulated,
            RequestedMode::Auto | RequestedMode::Live => {
                if self.missing_credentials().is_empty() {
                    RunMode::Live
                } else {
                    RunMode::Simulated
                }
            }
        }
    }
}
