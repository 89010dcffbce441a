//! Teacher identity.

use serde::{Deserialize, Serialize};

/// A teacher: upstream id plus display name.
///
/// Talks reference teachers by id only; the name lives in the directory
/// snapshot or is resolved per-id through the expiring cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: u64,
    pub name: String,
}
