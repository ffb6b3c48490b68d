//! Error types for the lemlist client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LemlistError>;

#[derive(Debug, Error)]
pub enum LemlistError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}
