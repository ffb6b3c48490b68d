use anyhow::{Context, Result};
use async_trait::async_trait;
use phantombuster_client::{EngagementRow, PhantombusterClient};
use tracing::{info, warn};

use super::BaseEngagementFeed;
use crate::domains::contacts::models::RawEngagementRecord;

/// Agents whose outputs feed the sync.
#[derive(Debug, Clone, Default)]
pub struct PhantomAgents {
    pub commenters: Option<String>,
    pub likers: Option<String>,
    /// Launched after both batches are processed
    pub next: Option<String>,
}

enum Backend {
    Live {
        client: PhantombusterClient,
        agents: PhantomAgents,
    },
    Simulated,
}

/// Phantombuster implementation of BaseEngagementFeed
pub struct PhantombusterFeed {
    backend: Backend,
}

impl PhantombusterFeed {
    pub fn live(client: PhantombusterClient, agents: PhantomAgents) -> Self {
        Self {
            backend: Backend::Live { client, agents },
        }
    }

    /// Fixed sample people, no network calls.
    pub fn simulated() -> Self {
        Self {
            backend: Backend::Simulated,
        }
    }

    async fn fetch_agent(
        client: &PhantombusterClient,
        agent_id: Option<&str>,
        what: &str,
    ) -> Result<Vec<RawEngagementRecord>> {
        let agent_id =
            agent_id.with_context(|| format!("No Phantombuster agent configured for {}", what))?;

        let rows = client
            .fetch_result_rows(agent_id)
            .await
            .with_context(|| format!("Failed to fetch {} from Phantombuster", what))?;

        Ok(rows.into_iter().map(to_record).collect())
    }
}

fn to_record(row: EngagementRow) -> RawEngagementRecord {
    RawEngagementRecord {
        first_name: row.first_name,
        last_name: row.last_name,
        profile_url: row.profile_url,
    }
}

pub fn sample_commenters() -> Vec<RawEngagementRecord> {
    vec![
        RawEngagementRecord::new("Ada", "Lovelace", "https://linkedin.example/ada"),
        RawEngagementRecord::new("Alan", "Turing", "https://linkedin.example/alan"),
    ]
}

pub fn sample_likers() -> Vec<RawEngagementRecord> {
    vec![RawEngagementRecord::new(
        "Grace",
        "Hopper",
        "https://linkedin.example/grace",
    )]
}

#[async_trait]
impl BaseEngagementFeed for PhantombusterFeed {
    async fn fetch_commenters(&self) -> Result<Vec<RawEngagementRecord>> {
        match &self.backend {
            Backend::Live { client, agents } => {
                Self::fetch_agent(client, agents.commenters.as_deref(), "commenters").await
            }
            Backend::Simulated => {
                info!(system = "phantombuster", "Using simulated commenters");
                Ok(sample_commenters())
            }
        }
    }

    async fn fetch_likers(&self) -> Result<Vec<RawEngagementRecord>> {
        match &self.backend {
            Backend::Live { client, agents } => {
                Self::fetch_agent(client, agents.likers.as_deref(), "likers").await
            }
            Backend::Simulated => {
                info!(system = "phantombuster", "Using simulated likers");
                Ok(sample_likers())
            }
        }
    }

    async fn trigger_next(&self) -> Result<bool> {
        match &self.backend {
            Backend::Live { client, agents } => {
                let Some(agent_id) = agents.next.as_deref() else {
                    warn!(
                        system = "phantombuster",
                        "No follow-up agent configured, nothing to trigger"
                    );
                    return Ok(false);
                };

                client
                    .launch_agent(agent_id)
                    .await
                    .context("Failed to launch follow-up Phantombuster agent")?;
                Ok(true)
            }
            Backend::Simulated => {
                info!(system = "phantombuster", "Simulated trigger of next agent");
                Ok(true)
            }
        }
    }
}
