//! Error types for the Phantombuster client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PhantombusterError>;

#[derive(Debug, Error)]
pub enum PhantombusterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The agent output could not be decoded into engagement rows
    #[error("Parse error: {0}")]
    Parse(String),
}
