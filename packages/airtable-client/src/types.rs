use serde::{Deserialize, Serialize};

/// A table record with typed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<F> {
    pub id: String,
    pub fields: F,
    pub created_time: Option<String>,
}

/// Response of a list request.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<F> {
    pub records: Vec<Record<F>>,
    pub offset: Option<String>,
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize)]
pub struct FieldsBody<'a, F> {
    pub fields: &'a F,
}
