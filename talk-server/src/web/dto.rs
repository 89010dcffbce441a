//! Request and response DTOs for the web layer.
//!
//! List responses reuse the domain types directly (they already serialize
//! camelCase); only query parameters and envelopes live here.

use serde::{Deserialize, Serialize};

use crate::domain::Teacher;

/// Query parameters for talk search.
#[derive(Debug, Deserialize)]
pub struct TalkSearchQuery {
    /// Free-text search query; empty short-circuits to an empty page.
    #[serde(default)]
    pub q: String,

    /// Positional page, raw: absent or unparseable defaults to 1.
    pub page: Option<String>,
}

/// Query parameters for teacher search.
#[derive(Debug, Deserialize)]
pub struct TeacherSearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Query parameters for a teacher's or retreat's talk listing.
#[derive(Debug, Deserialize)]
pub struct TalkListQuery {
    pub page: Option<String>,

    /// Optional filter term, forwarded upstream (teacher pages only).
    #[serde(default)]
    pub q: String,
}

/// Response for teacher search.
#[derive(Debug, Serialize)]
pub struct TeacherSearchResponse {
    pub teachers: Vec<Teacher>,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Resolve a raw `page` parameter; pagination is positional and 1-based.
pub(crate) fn page_or_first(raw: &Option<String>) -> u32 {
    raw.as_deref()
        .and_then(|s| s.parse().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}
