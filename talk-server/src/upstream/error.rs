//! Upstream error types.

/// Errors from the upstream site.
///
/// Parse misses inside a document are never errors (the parsers default the
/// missing field and continue); this type covers transport and payload-level
/// failures only.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("upstream status {status}: {message}")]
    Status { status: u16, message: String },

    /// Failed to parse a JSON API response
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
