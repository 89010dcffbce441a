//! The adapter facade.
//!
//! Owns the process-wide singletons (expiring cache, teacher directory) and
//! the upstream transport, and serves talk search, teacher search, a
//! teacher's talks, a retreat's talks, and single-talk detail. Nothing here
//! retries: a failed upstream call fails the operation and the caller
//! decides whether to re-invoke it.

use std::sync::Arc;

use crate::cache::ExpiringCache;
use crate::domain::{RetreatPage, TalkDetail, TalkPage, Teacher};
use crate::teachers::TeacherDirectory;
use crate::upstream::{Upstream, UpstreamError, parse_feed, parse_listing};

/// Catalog of talks and teachers, backed by the upstream site.
pub struct Catalog {
    upstream: Arc<dyn Upstream>,
    cache: ExpiringCache,
    directory: TeacherDirectory,
}

impl Catalog {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self {
            cache: ExpiringCache::new(),
            directory: TeacherDirectory::new(upstream.clone()),
            upstream,
        }
    }

    /// Search talks by free-text query. One listing page per call.
    pub async fn search_talks(&self, query: &str, page: u32) -> Result<TalkPage, UpstreamError> {
        let html = self.upstream.search_page(query, page).await?;
        Ok(parse_listing(&html, page, self.upstream.base_url()))
    }

    /// Search teachers by name (bootstraps the directory on first use).
    pub async fn search_teachers(&self, query: &str) -> Result<Vec<Teacher>, UpstreamError> {
        self.directory.search(query).await
    }

    /// One page of a teacher's talks, optionally filtered by a search term.
    ///
    /// Teacher pages omit the teacher name inline, so summaries with an
    /// empty name are backfilled from the single-id name resolver.
    pub async fn teacher_talks(
        &self,
        teacher_id: u64,
        page: u32,
        query: Option<&str>,
    ) -> Result<TalkPage, UpstreamError> {
        let html = self.upstream.teacher_page(teacher_id, page, query).await?;
        let mut result = parse_listing(&html, page, self.upstream.base_url());

        if result.talks.iter().any(|t| t.teacher.is_empty()) {
            let name = self.resolve_teacher_name(teacher_id).await;
            if !name.is_empty() {
                for talk in result.talks.iter_mut().filter(|t| t.teacher.is_empty()) {
                    talk.teacher = name.clone();
                }
            }
        }

        Ok(result)
    }

    /// A retreat's talks, from its RSS feed (fetched in full, one page).
    pub async fn retreat_talks(&self, retreat_id: u64) -> Result<RetreatPage, UpstreamError> {
        let xml = self.upstream.retreat_feed(retreat_id).await?;
        Ok(parse_feed(&xml, retreat_id))
    }

    /// Single-talk detail, cache-first under `talk:<id>`.
    ///
    /// `Ok(None)` means the upstream payload doesn't know the id — distinct
    /// from a transport failure, and never cached, so a later call retries
    /// upstream.
    pub async fn talk_detail(&self, id: u64) -> Result<Option<TalkDetail>, UpstreamError> {
        let key = format!("talk:{id}");

        if let Some(json) = self.cache.get(&key).await {
            if let Ok(detail) = serde_json::from_str::<TalkDetail>(&json) {
                return Ok(Some(detail));
            }
        }

        let mut items = self.upstream.talk_items(&[id]).await?;
        let Some(raw) = items.remove(&id) else {
            return Ok(None);
        };

        let teacher = self.resolve_teacher_name(raw.teacher_id).await;

        let audio_url = match raw.audio_url.as_deref() {
            Some(url) if url.starts_with("http") => url.to_string(),
            Some(url) if !url.is_empty() => format!("{}{url}", self.upstream.base_url()),
            _ => String::new(),
        };

        let detail = TalkDetail {
            id,
            title: raw.title.unwrap_or_default(),
            teacher,
            description: raw.description.unwrap_or_default(),
            duration_minutes: raw
                .duration_in_minutes
                .map(|m| m.round() as u32)
                .unwrap_or(0),
            date: raw.rec_date.unwrap_or_default(),
            audio_url,
            retreat_id: None,
            retreat_title: raw.retreat_title,
        };

        // Cache the assembled detail, not the raw payload: once cached,
        // identical content is served until expiry regardless of intervening
        // upstream state.
        match serde_json::to_string(&detail) {
            Ok(json) => self.cache.insert(key, json).await,
            Err(e) => tracing::error!(talk_id = id, error = %e, "failed to serialize talk detail"),
        }

        Ok(Some(detail))
    }

    /// Resolve a single teacher id to a display name, cache-assisted under
    /// `teacher:<id>` (independent of the directory bootstrap — this is a
    /// one-id lookup, not the full-list path). Degrades to an empty name on
    /// upstream failure; never fails the surrounding operation.
    async fn resolve_teacher_name(&self, teacher_id: u64) -> String {
        if teacher_id == 0 {
            return String::new();
        }

        let key = format!("teacher:{teacher_id}");
        if let Some(name) = self.cache.get(&key).await {
            return name;
        }

        let mut items = match self.upstream.teacher_items(&[teacher_id]).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(teacher_id, error = %e, "teacher name resolution failed");
                return String::new();
            }
        };

        let name = items
            .remove(&teacher_id)
            .and_then(|t| t.name)
            .unwrap_or_default();

        self.cache.insert(key, name.clone()).await;
        name
    }
}
