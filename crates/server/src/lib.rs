#![forbid(unsafe_code)]

pub mod pages;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AppState, SharedState};
