use serde::{Deserialize, Serialize};

/// A commenter or liker as exported by the engagement feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEngagementRecord {
    pub first_name: String,
    pub last_name: String,
    pub profile_url: String,
}

impl RawEngagementRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            profile_url: profile_url.into(),
        }
    }

    /// "First Last", without dangling whitespace when a part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
}

/// Contact details derived from a [`RawEngagementRecord`] by enrichment.
///
/// `emails` is ordered by the enrichment provider's confidence; the first
/// entry is the primary address. An empty list means the person could not be
/// identified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProfile {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<EmailAddress>,
    pub phone: Option<String>,
    pub linkedin_url: String,
    pub company: Option<String>,
    pub website: Option<String>,
}

impl EnrichedProfile {
    /// A profile carrying only what the raw record already knew.
    pub fn unresolved(record: &RawEngagementRecord) -> Self {
        Self {
            full_name: record.full_name(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            emails: Vec::new(),
            phone: None,
            linkedin_url: record.profile_url.clone(),
            company: None,
            website: None,
        }
    }

    /// The primary email, if enrichment found one.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .first()
            .map(|e| e.email.trim())
            .filter(|e| !e.is_empty())
    }
}
