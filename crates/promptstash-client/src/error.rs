use thiserror::Error;

/// Errors that can be returned by promptstash-client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An HTTP request failed (network error, timeout, invalid URL, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}
