//! Error types for the CBS catalog client.

use super::query::Format;

/// Errors returned by the CBS catalog client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The server rejected the level/path/subject combination.
    #[error("catalog path not found")]
    PathNotFound,

    /// Response body did not match the catalog envelope.
    #[error("malformed catalog response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The paging `current_url` could not be turned into a page URL.
    #[error("invalid page URL {url:?}: {reason}")]
    InvalidPageUrl { url: String, reason: String },

    /// Only JSON responses are parsed.
    #[error("unsupported response format: {0}")]
    UnsupportedFormat(Format),

    /// The client's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,

    /// A page worker panicked or was aborted.
    #[error("page worker failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// Whether this is a network-level failure (connection, timeout or
    /// non-2xx status) rather than a problem with the response content.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. })
    }
}
