use std::sync::Arc;

use services::{CatalogService, ProgressStore};

pub type SharedState = Arc<AppState>;

/// Central application state handed to every request handler.
///
/// Holds the explicit service instances for this server; handlers receive
/// them by reference through the router state, never through a global.
pub struct AppState {
    catalog: CatalogService,
    progress: ProgressStore,
}

impl AppState {
    /// Construct an [`AppState`] wrapped in an [`Arc`] so the router can
    /// clone it cheaply per request.
    #[must_use]
    pub fn new(catalog: CatalogService, progress: ProgressStore) -> SharedState {
        Arc::new(Self { catalog, progress })
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }
}
