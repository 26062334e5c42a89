mod game;
mod ids;
mod topic;

pub use game::GameRef;
pub use ids::{GameId, GameIdError, SlugError, TopicSlug};
pub use topic::{Topic, TopicError};
