//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use trakship_chat::ResponseEngine;
use trakship_core::config::TrakshipConfig;
use trakship_storage::{Database, FaqRepository, SessionRepository};

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<TrakshipConfig>,
    /// SQLite database for persistent storage.
    pub database: Arc<Database>,
    /// Scripted chatbot response engine.
    pub engine: Arc<ResponseEngine>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState over the given database.
    pub fn new(config: TrakshipConfig, database: Arc<Database>) -> Self {
        let engine = ResponseEngine::new(
            SessionRepository::new(Arc::clone(&database)),
            FaqRepository::new(Arc::clone(&database)),
            config.chat.max_message_length,
        );
        Self::with_engine(config, database, engine)
    }

    /// Create an AppState with a pre-built engine (used by tests to pin
    /// the phrase picker).
    pub fn with_engine(
        config: TrakshipConfig,
        database: Arc<Database>,
        engine: ResponseEngine,
    ) -> Self {
        Self {
            config: Arc::new(config),
            database,
            engine: Arc::new(engine),
            start_time: Instant::now(),
        }
    }

    pub fn sessions(&self) -> SessionRepository {
        SessionRepository::new(Arc::clone(&self.database))
    }
}
