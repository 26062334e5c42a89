//! Shared error types for the services crate.

use thiserror::Error;

use play_core::model::{GameId, TopicSlug};

/// Errors emitted by `CatalogService`.
///
/// Point lookups report absence; only a failure to enumerate the catalog
/// root itself surfaces an IO error, since per-entry problems degrade to
/// fallback topics instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("topic not found: {slug}")]
    TopicNotFound { slug: TopicSlug },

    #[error("game not found: {topic}/{game}")]
    GameNotFound { topic: TopicSlug, game: GameId },

    #[error("catalog root unreadable: {0}")]
    Root(#[source] std::io::Error),
}

impl CatalogError {
    /// True for the absence variants that map to a 404 at the HTTP edge.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::TopicNotFound { .. } | CatalogError::GameNotFound { .. }
        )
    }
}

/// Errors emitted by `GameSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("game session has no items")]
    Empty,
}
