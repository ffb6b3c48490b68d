//! Error types for the Dropcontact client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DropcontactError>;

#[derive(Debug, Error)]
pub enum DropcontactError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API accepted the call but reported a failure in the body
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The batch was still processing after the last poll
    #[error("Batch {request_id} not ready after {attempts} polls")]
    NotReady { request_id: String, attempts: u32 },
}
