//! SQLite persistence for the TrakShip backend.
//!
//! Provides a WAL-mode SQLite database with migrations and repository
//! types for chat sessions, the FAQ catalog, users, and auth tokens.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{FaqRepository, SessionRepository, TokenRepository, UserRepository};
