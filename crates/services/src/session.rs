use play_core::model::{GameId, TopicSlug};
use play_core::score::{MAX_SCORE_DEFAULT, ScoreError, ScoreResult};
use rand::seq::SliceRandom;
use serde_json::Value;
use storage::repository::ProgressRecord;

use crate::countdown::Countdown;
use crate::error::SessionError;
use crate::progress::ProgressStore;

/// Shuffles game items in place (Fisher-Yates).
pub fn shuffle<T>(items: &mut [T]) {
    let mut rng = rand::rng();
    items.shuffle(&mut rng);
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSessionProgress {
    pub total: u32,
    pub answered: u32,
    pub remaining: u32,
    pub is_complete: bool,
}

/// One active play-through of a game.
///
/// Each session exclusively owns its countdown, score bookkeeping, and
/// progress store reference; two sessions never share mutable state, so
/// no locking is needed anywhere in the runtime.
pub struct GameSession {
    topic: TopicSlug,
    game: GameId,
    total: u32,
    answered: u32,
    correct: u32,
    max_score: u32,
    countdown: Option<Countdown>,
    progress: ProgressStore,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("topic", &self.topic.as_str())
            .field("game", &self.game.as_str())
            .field("total", &self.total)
            .field("answered", &self.answered)
            .field("correct", &self.correct)
            .field("max_score", &self.max_score)
            .field("countdown", &self.countdown.is_some())
            .finish()
    }
}

impl GameSession {
    /// Opens a session over `total` answerable items.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `total` is zero.
    pub fn new(
        topic: TopicSlug,
        game: GameId,
        total: u32,
        progress: ProgressStore,
    ) -> Result<Self, SessionError> {
        if total == 0 {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            topic,
            game,
            total,
            answered: 0,
            correct: 0,
            max_score: MAX_SCORE_DEFAULT,
            countdown: None,
            progress,
        })
    }

    /// Overrides the score ceiling for this session's games.
    #[must_use]
    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = max_score;
        self
    }

    /// Attaches a time limit; the caller configures observers on the
    /// countdown before handing it over.
    #[must_use]
    pub fn with_countdown(mut self, countdown: Countdown) -> Self {
        self.countdown = Some(countdown);
        self
    }

    // Accessors
    #[must_use]
    pub fn topic(&self) -> &TopicSlug {
        &self.topic
    }

    #[must_use]
    pub fn game(&self) -> &GameId {
        &self.game
    }

    #[must_use]
    pub fn countdown_mut(&mut self) -> Option<&mut Countdown> {
        self.countdown.as_mut()
    }

    #[must_use]
    pub fn progress_store(&self) -> &ProgressStore {
        &self.progress
    }

    /// Records one answered item. Answers past the session total are
    /// ignored; the session is already complete.
    pub fn record_answer(&mut self, is_correct: bool) -> GameSessionProgress {
        if self.answered < self.total {
            self.answered += 1;
            if is_correct {
                self.correct += 1;
            }
        }
        self.progress_view()
    }

    #[must_use]
    pub fn progress_view(&self) -> GameSessionProgress {
        GameSessionProgress {
            total: self.total,
            answered: self.answered,
            remaining: self.total - self.answered,
            is_complete: self.answered == self.total,
        }
    }

    /// Computes the bounded score and feedback tier for the answers so far.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` if the inputs are out of range; with session
    /// counters this only happens through a misconfigured `total`.
    pub fn score(&self) -> Result<ScoreResult, ScoreError> {
        ScoreResult::compute(self.correct, self.total, self.max_score)
    }

    /// Persists arbitrary structured progress for this session's game.
    pub async fn save_progress(&self, payload: Value) {
        self.progress.save(&self.game, payload).await;
    }

    /// Restores previously saved progress, if any.
    pub async fn load_progress(&self) -> Option<ProgressRecord> {
        self.progress.load(&self.game).await
    }

    /// Ends the session, halting any countdown. Idempotent.
    pub fn end(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.stop();
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
