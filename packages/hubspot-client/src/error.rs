//! Error types for the HubSpot client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HubspotError>;

#[derive(Debug, Error)]
pub enum HubspotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx batch response that did not contain the upserted contact
    #[error("Empty batch result for {0}")]
    EmptyResult(String),
}
