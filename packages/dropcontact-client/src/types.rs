use serde::{Deserialize, Serialize};

/// One contact to enrich.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Body of `POST /batch`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    pub data: Vec<ContactInput>,
    pub siren: bool,
    pub language: String,
}

impl BatchRequest {
    pub fn new(data: Vec<ContactInput>) -> Self {
        Self {
            data,
            siren: false,
            language: "en".to_string(),
        }
    }
}

/// Response of `POST /batch`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSubmitted {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: bool,
    pub request_id: Option<String>,
    pub reason: Option<String>,
    pub credits_left: Option<i64>,
}

/// Response of `GET /batch/{request_id}`.
///
/// `success` is false with a `reason` while the batch is still processing.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: bool,
    pub reason: Option<String>,
    #[serde(default)]
    pub data: Vec<EnrichedContact>,
}

/// An enriched contact as returned by Dropcontact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichedContact {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Vec<EmailEntry>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailEntry {
    pub email: String,
    pub qualification: Option<String>,
}
