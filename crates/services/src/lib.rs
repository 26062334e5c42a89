#![forbid(unsafe_code)]

pub mod catalog;
pub mod countdown;
pub mod error;
pub mod progress;
pub mod session;

pub use play_core::Clock;

pub use catalog::{CatalogService, GameResource, TopicRecord};
pub use countdown::Countdown;
pub use error::{CatalogError, SessionError};
pub use progress::ProgressStore;
pub use session::{GameSession, GameSessionProgress, shuffle};
