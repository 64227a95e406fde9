//! HTTP API for the TrakShip backend.
//!
//! Axum router exposing signup/signin, the user profile, and the chatbot
//! endpoints. Protected routes use opaque bearer tokens validated against
//! the token store.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, start_server};
pub use state::AppState;
