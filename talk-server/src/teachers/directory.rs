//! Teacher directory: one-shot bootstrap plus ranked substring search.
//!
//! Bootstrap fetches the full id set, then id → name details in sequential
//! batches of 500. It is all-or-nothing: a failed batch fails the whole
//! bootstrap and memoizes nothing, so a later call retries from batch 1.
//! Single-flight is the only mutual exclusion in the system — concurrent
//! first-time searches share one in-flight bootstrap rather than issuing
//! duplicate upstream work. Both properties fall out of
//! `tokio::sync::OnceCell::get_or_try_init`: the cell runs one initializer
//! at a time and stays unset on error.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::domain::Teacher;
use crate::upstream::{Upstream, UpstreamError};

/// Detail requests are batched this many ids at a time.
const BATCH_SIZE: usize = 500;

/// Search results are truncated to this many teachers.
const MAX_RESULTS: usize = 20;

/// Process-wide teacher directory.
///
/// Created empty at process start; the snapshot is populated lazily on first
/// search and never refreshed (reset only by process restart).
pub struct TeacherDirectory {
    upstream: Arc<dyn Upstream>,
    snapshot: OnceCell<Arc<Vec<Teacher>>>,
}

impl TeacherDirectory {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self {
            upstream,
            snapshot: OnceCell::new(),
        }
    }

    /// Search the directory, bootstrapping it on first use.
    ///
    /// Case-insensitive substring match; names whose lowercase form starts
    /// with the query rank before other substring matches, ties broken by
    /// name order; at most [`MAX_RESULTS`] results.
    ///
    /// A bootstrap failure surfaces here as an error; retry is the caller's
    /// responsibility (calling search again restarts the bootstrap).
    pub async fn search(&self, query: &str) -> Result<Vec<Teacher>, UpstreamError> {
        let snapshot = self
            .snapshot
            .get_or_try_init(|| self.bootstrap())
            .await?;

        let q = query.to_lowercase();

        let mut matches: Vec<&Teacher> = snapshot
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&q))
            .collect();

        matches.sort_by(|a, b| {
            let a_prefix = a.name.to_lowercase().starts_with(&q);
            let b_prefix = b.name.to_lowercase().starts_with(&q);
            b_prefix.cmp(&a_prefix).then_with(|| a.name.cmp(&b.name))
        });

        Ok(matches.into_iter().take(MAX_RESULTS).cloned().collect())
    }

    /// Fetch the whole directory. Ids whose detail carries no name are
    /// dropped; the directory only serves displayable teachers.
    async fn bootstrap(&self) -> Result<Arc<Vec<Teacher>>, UpstreamError> {
        let ids = self.upstream.teacher_ids().await?;
        tracing::info!(count = ids.len(), "bootstrapping teacher directory");

        let mut teachers = Vec::with_capacity(ids.len());
        for batch in ids.chunks(BATCH_SIZE) {
            let items = self.upstream.teacher_items(batch).await?;
            for (id, item) in items {
                if let Some(name) = item.name.filter(|n| !n.is_empty()) {
                    teachers.push(Teacher { id, name });
                }
            }
        }

        Ok(Arc::new(teachers))
    }
}
