//! Web layer for the carpool server.
//!
//! Provides HTTP endpoints for group times, driver profiles and trip
//! matching.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
