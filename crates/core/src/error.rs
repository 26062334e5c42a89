use thiserror::Error;

use crate::model::{GameIdError, SlugError, TopicError};
use crate::score::ScoreError;
use crate::timer::TimerError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    GameId(#[from] GameIdError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Timer(#[from] TimerError),
}
