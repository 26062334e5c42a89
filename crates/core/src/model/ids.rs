use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SlugError {
    #[error("topic slug cannot be empty")]
    Empty,

    #[error("topic slug contains invalid character {0:?}")]
    InvalidChar(char),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameIdError {
    #[error("game id cannot be empty")]
    Empty,

    #[error("game id contains invalid character {0:?}")]
    InvalidChar(char),
}

// Slugs and game ids address filesystem entries, so both are restricted to
// characters that can never traverse or escape the catalog root.
fn first_invalid_char(value: &str) -> Option<char> {
    value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
}

//
// ─── TOPIC SLUG ────────────────────────────────────────────────────────────────
//

/// Identifier for a topic, derived from its directory name.
///
/// Unique within a catalog root by construction: one directory, one slug.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicSlug(String);

impl TopicSlug {
    /// Validates and wraps a slug.
    ///
    /// # Errors
    ///
    /// Returns `SlugError` if the value is empty or contains a character
    /// outside `[A-Za-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugError::Empty);
        }
        if let Some(c) = first_invalid_char(&value) {
            return Err(SlugError::InvalidChar(c));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name derived from the slug: separators become spaces.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0.replace(['-', '_'], " ")
    }
}

impl TryFrom<String> for TopicSlug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopicSlug> for String {
    fn from(slug: TopicSlug) -> Self {
        slug.0
    }
}

impl FromStr for TopicSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for TopicSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicSlug({})", self.0)
    }
}

impl fmt::Display for TopicSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── GAME ID ───────────────────────────────────────────────────────────────────
//

/// Identifier for a playable game within a topic.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Validates and wraps a game id.
    ///
    /// # Errors
    ///
    /// Returns `GameIdError` if the value is empty or contains a character
    /// outside `[A-Za-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, GameIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(GameIdError::Empty);
        }
        if let Some(c) = first_invalid_char(&value) {
            return Err(GameIdError::InvalidChar(c));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GameId {
    type Error = GameIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl FromStr for GameId {
    type Err = GameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_accepts_filesystem_safe_names() {
        let slug: TopicSlug = "quadratic-equations".parse().unwrap();
        assert_eq!(slug.as_str(), "quadratic-equations");
        assert_eq!(slug.to_string(), "quadratic-equations");
    }

    #[test]
    fn slug_rejects_empty() {
        assert_eq!("".parse::<TopicSlug>().unwrap_err(), SlugError::Empty);
    }

    #[test]
    fn slug_rejects_path_traversal_characters() {
        assert_eq!(
            "../etc".parse::<TopicSlug>().unwrap_err(),
            SlugError::InvalidChar('.')
        );
        assert_eq!(
            "a/b".parse::<TopicSlug>().unwrap_err(),
            SlugError::InvalidChar('/')
        );
    }

    #[test]
    fn slug_display_name_replaces_separators() {
        let slug: TopicSlug = "world-war_two".parse().unwrap();
        assert_eq!(slug.display_name(), "world war two");
    }

    #[test]
    fn game_id_round_trips() {
        let id: GameId = "matching-pairs".parse().unwrap();
        assert_eq!(id.as_str(), "matching-pairs");
        let again: GameId = id.to_string().parse().unwrap();
        assert_eq!(id, again);
    }

    #[test]
    fn game_id_rejects_spaces() {
        assert_eq!(
            "word search".parse::<GameId>().unwrap_err(),
            GameIdError::InvalidChar(' ')
        );
    }
}
