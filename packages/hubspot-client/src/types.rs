use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contact properties keyed by HubSpot internal property name.
pub type Properties = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertInput {
    pub id_property: String,
    pub id: String,
    pub properties: Properties,
}

/// Body of `POST /crm/v3/objects/contacts/batch/upsert`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchUpsertRequest {
    pub inputs: Vec<UpsertInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchUpsertResponse {
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<ContactObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactObject {
    pub id: String,
    /// True when the upsert created the contact
    #[serde(default)]
    pub new: bool,
}
