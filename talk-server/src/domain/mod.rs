//! Normalized catalog domain model.
//!
//! Everything here is produced fresh per request from upstream documents;
//! nothing is persisted. Fields serialize camelCase because these types go
//! straight out over the JSON API.

mod talk;
mod teacher;

pub use talk::{RetreatPage, TalkDetail, TalkPage, TalkSummary};
pub use teacher::Teacher;
