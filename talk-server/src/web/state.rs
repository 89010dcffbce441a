//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;

/// Shared application state.
///
/// The catalog carries the process-wide singletons (expiring cache, teacher
/// directory), so this is the only thing handlers need.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
