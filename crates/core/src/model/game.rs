use serde::{Deserialize, Serialize};

use crate::model::ids::GameId;

/// An entry in a topic's authored games list.
///
/// A `GameRef` only names a game; whether it is playable is decided by the
/// catalog, which checks that the backing resource actually exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    id: GameId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl GameRef {
    #[must_use]
    pub fn new(id: GameId, title: Option<String>) -> Self {
        let title = title.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
        Self { id, title }
    }

    #[must_use]
    pub fn id(&self) -> &GameId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_ref_filters_blank_title() {
        let id: GameId = "quiz".parse().unwrap();
        let game = GameRef::new(id.clone(), Some("   ".into()));
        assert_eq!(game.title(), None);

        let game = GameRef::new(id, Some("  Quick Quiz ".into()));
        assert_eq!(game.title(), Some("Quick Quiz"));
    }

    #[test]
    fn game_ref_deserializes_without_title() {
        let game: GameRef = serde_json::from_str(r#"{"id":"quiz"}"#).unwrap();
        assert_eq!(game.id().as_str(), "quiz");
        assert_eq!(game.title(), None);
    }
}
