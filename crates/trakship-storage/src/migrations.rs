//! Database schema migrations.
//!
//! Applies the initial schema: users, auth_tokens, chat_sessions, messages,
//! faqs, and the schema_migrations tracking table.

use rusqlite::Connection;
use tracing::info;

use trakship_core::error::TrakshipError;

/// Run all pending database migrations.
///
/// Currently implements the initial schema (version 1). Future migrations
/// can be added by checking the current version and applying incremental
/// changes.
pub fn run_migrations(conn: &Connection) -> Result<(), TrakshipError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| TrakshipError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| TrakshipError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<(), TrakshipError> {
    conn.execute_batch(
        "
        -- Registered accounts. Password hashes never leave this table.
        CREATE TABLE IF NOT EXISTS users (
            id              TEXT PRIMARY KEY NOT NULL,
            name            TEXT NOT NULL,
            email           TEXT NOT NULL UNIQUE,
            phone           TEXT NOT NULL,
            address         TEXT NOT NULL,
            city            TEXT NOT NULL,
            state           TEXT NOT NULL,
            pincode         TEXT NOT NULL,
            password_hash   TEXT NOT NULL,
            created_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_users_email ON users (email);

        -- Opaque bearer tokens issued at signup/signin.
        CREATE TABLE IF NOT EXISTS auth_tokens (
            token       TEXT PRIMARY KEY NOT NULL,
            user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            expires_at  INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_auth_tokens_user
            ON auth_tokens (user_id);

        -- Chat sessions. user_id is NULL for anonymous visitors.
        CREATE TABLE IF NOT EXISTS chat_sessions (
            session_id      TEXT PRIMARY KEY NOT NULL,
            user_id         TEXT REFERENCES users(id) ON DELETE SET NULL,
            created_at      INTEGER NOT NULL,
            last_activity   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_chat_sessions_user
            ON chat_sessions (user_id, last_activity DESC)
            WHERE user_id IS NOT NULL;

        -- Message log. The AUTOINCREMENT id gives append order within a
        -- session regardless of timestamp granularity.
        CREATE TABLE IF NOT EXISTS messages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  TEXT NOT NULL
                        REFERENCES chat_sessions(session_id) ON DELETE CASCADE,
            sender      TEXT NOT NULL CHECK (sender IN ('user', 'bot')),
            text        TEXT NOT NULL,
            timestamp   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_session
            ON messages (session_id, id ASC);

        -- FAQ catalog. keywords is a JSON array of strings.
        CREATE TABLE IF NOT EXISTS faqs (
            id          TEXT PRIMARY KEY NOT NULL,
            question    TEXT NOT NULL,
            keywords    TEXT NOT NULL DEFAULT '[]',
            answer      TEXT NOT NULL,
            category    TEXT NOT NULL
                        CHECK (category IN ('shipping', 'tracking', 'delivery',
                                            'pricing', 'account', 'general',
                                            'support')),
            priority    INTEGER NOT NULL DEFAULT 1,
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_faqs_active_priority
            ON faqs (active, priority DESC);

        -- Record migration.
        INSERT OR IGNORE INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| TrakshipError::Storage(format!("Failed to apply migration v1: {}", e)))?;

    Ok(())
}
