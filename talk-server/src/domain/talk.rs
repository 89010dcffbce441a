//! Talk types.

use serde::{Deserialize, Serialize};

/// A single talk as it appears in a listing or feed.
///
/// Immutable once constructed. The teacher name may be empty when the source
/// document omits it (teacher pages leave it out inline; the facade backfills
/// it). The date is `YYYY-MM-DD`, or empty if the source token was
/// unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkSummary {
    /// Upstream-assigned talk id.
    pub id: u64,

    /// Talk title, entity-decoded.
    pub title: String,

    /// Teacher display name; empty if unresolved.
    pub teacher: String,

    /// Duration rounded to whole minutes.
    pub duration_minutes: u32,

    /// Recording date, `YYYY-MM-DD` or empty.
    pub date: String,

    /// Absolute audio URL.
    pub audio_url: String,

    /// Retreat the talk belongs to, when the listing links one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreat_id: Option<u64>,

    /// Display title of that retreat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreat_title: Option<String>,
}

/// Full talk detail: summary fields plus a free-text description.
///
/// Cached under `talk:<id>` for 24 hours as an opaque JSON string, hence the
/// `Deserialize` derive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkDetail {
    pub id: u64,
    pub title: String,
    pub teacher: String,
    pub description: String,
    pub duration_minutes: u32,
    pub date: String,
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreat_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreat_title: Option<String>,
}

/// One page of talks.
///
/// `page` is purely positional (the upstream site's own pagination) and
/// `has_more` is content-derived: the upstream exposes no total counts, only
/// a "next" marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkPage {
    pub talks: Vec<TalkSummary>,
    pub page: u32,
    pub has_more: bool,
}

/// A retreat's talks: a single page plus the retreat's display title.
///
/// Feeds are fetched in full, so `page.has_more` is always false here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetreatPage {
    #[serde(flatten)]
    pub page: TalkPage,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreat_title: Option<String>,
}
