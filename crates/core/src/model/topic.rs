use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::game::GameRef;
use crate::model::ids::TopicSlug;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic display name cannot be empty")]
    EmptyDisplayName,
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A named grouping of games sharing a subject area.
///
/// Serializes to the wire/metadata shape
/// `{slug, topic, description, games, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    slug: TopicSlug,
    #[serde(rename = "topic")]
    display_name: String,
    description: String,
    games: Vec<GameRef>,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

impl Topic {
    /// Creates a topic from authored metadata.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyDisplayName` if the display name is empty
    /// or whitespace-only.
    pub fn new(
        slug: TopicSlug,
        display_name: impl Into<String>,
        description: impl Into<String>,
        games: Vec<GameRef>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TopicError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(TopicError::EmptyDisplayName);
        }

        Ok(Self {
            slug,
            display_name: display_name.trim().to_owned(),
            description: description.into().trim().to_owned(),
            games,
            created_at,
        })
    }

    /// Synthesizes a topic for a directory whose metadata is absent or
    /// unreadable: name derived from the slug, no games.
    #[must_use]
    pub fn fallback(slug: TopicSlug, created_at: DateTime<Utc>) -> Self {
        let display_name = slug.display_name();
        let description = format!("Learning games for {display_name}");
        Self {
            slug,
            display_name,
            description,
            games: Vec::new(),
            created_at,
        }
    }

    // Accessors
    #[must_use]
    pub fn slug(&self) -> &TopicSlug {
        &self.slug
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn games(&self) -> &[GameRef] {
        &self.games
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn slug(raw: &str) -> TopicSlug {
        raw.parse().unwrap()
    }

    #[test]
    fn topic_new_rejects_empty_display_name() {
        let err = Topic::new(slug("algebra"), "  ", "", Vec::new(), fixed_now()).unwrap_err();
        assert_eq!(err, TopicError::EmptyDisplayName);
    }

    #[test]
    fn topic_new_trims_fields() {
        let topic = Topic::new(
            slug("algebra"),
            "  Algebra  ",
            "  Equations and factoring  ",
            Vec::new(),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(topic.display_name(), "Algebra");
        assert_eq!(topic.description(), "Equations and factoring");
    }

    #[test]
    fn fallback_synthesizes_name_and_description() {
        let topic = Topic::fallback(slug("world-history"), fixed_now());

        assert_eq!(topic.display_name(), "world history");
        assert_eq!(topic.description(), "Learning games for world history");
        assert!(topic.games().is_empty());
        assert_eq!(topic.created_at(), fixed_now());
    }

    #[test]
    fn topic_serializes_to_wire_shape() {
        let topic = Topic::fallback(slug("algebra"), fixed_now());
        let value = serde_json::to_value(&topic).unwrap();

        assert_eq!(value["slug"], "algebra");
        assert_eq!(value["topic"], "algebra");
        assert!(value["games"].as_array().unwrap().is_empty());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("display_name").is_none());
    }
}
