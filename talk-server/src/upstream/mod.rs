//! Upstream content adapter internals.
//!
//! The upstream site has no structured API for most of its content: listings
//! are HTML, retreat feeds are RSS, and only talk/teacher detail comes from
//! a minimal JSON endpoint. This module owns the transport (`DharmaClient`)
//! and the document parsers; the [`Upstream`] trait is the seam that lets
//! the directory and catalog run against in-memory fakes in tests.

mod client;
mod error;
mod feed;
mod listing;
mod text;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

pub use client::{DharmaClient, DharmaConfig};
pub use error::UpstreamError;
pub use feed::parse_feed;
pub use listing::parse_listing;

/// A talk as the upstream JSON API returns it. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TalkItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub teacher_id: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub duration_in_minutes: Option<f64>,
    #[serde(default)]
    pub rec_date: Option<String>,
    #[serde(default)]
    pub retreat_title: Option<String>,
}

/// A teacher as the upstream JSON API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherItem {
    #[serde(default)]
    pub name: Option<String>,
}

/// Transport boundary to the upstream site.
///
/// One method per upstream resource. Implementations report any non-success
/// HTTP status as an error; "id not in the payload" is not an error here,
/// callers see it as an absent map entry.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Search-results HTML for a query.
    async fn search_page(&self, query: &str, page: u32) -> Result<String, UpstreamError>;

    /// A teacher's talks page HTML, optionally filtered by a search term.
    async fn teacher_page(
        &self,
        teacher_id: u64,
        page: u32,
        query: Option<&str>,
    ) -> Result<String, UpstreamError>;

    /// A retreat's RSS feed XML.
    async fn retreat_feed(&self, retreat_id: u64) -> Result<String, UpstreamError>;

    /// Talk detail for a batch of ids.
    async fn talk_items(&self, ids: &[u64]) -> Result<HashMap<u64, TalkItem>, UpstreamError>;

    /// The full set of teacher ids.
    async fn teacher_ids(&self) -> Result<Vec<u64>, UpstreamError>;

    /// Teacher detail for a batch of ids.
    async fn teacher_items(&self, ids: &[u64]) -> Result<HashMap<u64, TeacherItem>, UpstreamError>;

    /// Base URL, for absolutizing relative paths found in documents.
    fn base_url(&self) -> &str;
}
