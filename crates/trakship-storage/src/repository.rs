//! Repositories for chat sessions, the FAQ catalog, users, and auth tokens.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use trakship_core::error::{Result, TrakshipError};
use trakship_core::types::{ChatSession, FaqCategory, FaqEntry, Message, Sender, User};

use crate::db::Database;

fn storage_err(e: rusqlite::Error) -> TrakshipError {
    TrakshipError::Storage(e.to_string())
}

fn to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Persistence for chat sessions and their message logs.
pub struct SessionRepository {
    db: Arc<Database>,
}

impl SessionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Fetch a session by id, creating it if it does not exist.
    ///
    /// A newly created session carries the given owner (if any) and an
    /// empty message log.
    pub fn get_or_create(&self, session_id: &str, user_id: Option<Uuid>) -> Result<ChatSession> {
        self.db.with_conn(|conn| {
            if let Some(session) = load_session(conn, session_id)? {
                return Ok(session);
            }

            let now = Utc::now();
            conn.execute(
                "INSERT INTO chat_sessions (session_id, user_id, created_at, last_activity)
                 VALUES (?1, ?2, ?3, ?3)",
                params![
                    session_id,
                    user_id.map(|id| id.to_string()),
                    now.timestamp()
                ],
            )
            .map_err(storage_err)?;

            debug!("Created chat session {}", session_id);

            Ok(ChatSession {
                session_id: session_id.to_string(),
                user_id,
                messages: Vec::new(),
                created_at: now,
                last_activity: now,
            })
        })
    }

    /// Fetch a session by id without creating it.
    pub fn get(&self, session_id: &str) -> Result<Option<ChatSession>> {
        self.db.with_conn(|conn| load_session(conn, session_id))
    }

    /// Append a message to a session and bump its last activity.
    ///
    /// The insert and the activity bump happen in one transaction so a
    /// session can never show a message without the matching activity time.
    pub fn append(&self, session_id: &str, sender: Sender, text: &str) -> Result<Message> {
        self.db.with_conn(|conn| {
            let now = Utc::now();
            let tx = conn.unchecked_transaction().map_err(storage_err)?;

            tx.execute(
                "INSERT INTO messages (session_id, sender, text, timestamp)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session_id, sender.as_str(), text, now.timestamp()],
            )
            .map_err(storage_err)?;

            tx.execute(
                "UPDATE chat_sessions SET last_activity = ?1 WHERE session_id = ?2",
                params![now.timestamp(), session_id],
            )
            .map_err(storage_err)?;

            tx.commit().map_err(storage_err)?;

            Ok(Message {
                sender,
                text: text.to_string(),
                timestamp: now,
            })
        })
    }

    /// Message log for a session in append order.
    ///
    /// Returns an empty vec for an unknown session id.
    pub fn history(&self, session_id: &str) -> Result<Vec<Message>> {
        self.db
            .with_conn(|conn| load_messages(conn, session_id))
    }

    /// Total number of sessions ever created.
    pub fn count(&self) -> Result<i64> {
        self.db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM chat_sessions", [], |row| row.get(0))
                .map_err(storage_err)
        })
    }

    /// The most recently active sessions owned by a user, newest first.
    pub fn recent_for_user(&self, user_id: Uuid, limit: u64) -> Result<Vec<ChatSession>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT session_id, user_id, created_at, last_activity
                     FROM chat_sessions
                     WHERE user_id = ?1
                     ORDER BY last_activity DESC
                     LIMIT ?2",
                )
                .map_err(storage_err)?;

            let rows = stmt
                .query_map(params![user_id.to_string(), limit as i64], session_row)
                .map_err(storage_err)?;

            let mut sessions = Vec::new();
            for row in rows {
                let mut session = row.map_err(storage_err)?;
                session.messages = load_messages(conn, &session.session_id)?;
                sessions.push(session);
            }
            Ok(sessions)
        })
    }
}

fn session_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatSession> {
    let user_id: Option<String> = row.get(1)?;
    Ok(ChatSession {
        session_id: row.get(0)?,
        user_id: user_id.and_then(|s| Uuid::parse_str(&s).ok()),
        messages: Vec::new(),
        created_at: to_datetime(row.get(2)?),
        last_activity: to_datetime(row.get(3)?),
    })
}

fn load_session(conn: &Connection, session_id: &str) -> Result<Option<ChatSession>> {
    let session = conn
        .query_row(
            "SELECT session_id, user_id, created_at, last_activity
             FROM chat_sessions WHERE session_id = ?1",
            params![session_id],
            session_row,
        )
        .optional()
        .map_err(storage_err)?;

    match session {
        Some(mut session) => {
            session.messages = load_messages(conn, session_id)?;
            Ok(Some(session))
        }
        None => Ok(None),
    }
}

fn load_messages(conn: &Connection, session_id: &str) -> Result<Vec<Message>> {
    let mut stmt = conn
        .prepare(
            "SELECT sender, text, timestamp FROM messages
             WHERE session_id = ?1 ORDER BY id ASC",
        )
        .map_err(storage_err)?;

    let rows = stmt
        .query_map(params![session_id], |row| {
            let sender: String = row.get(0)?;
            Ok((sender, row.get::<_, String>(1)?, row.get::<_, i64>(2)?))
        })
        .map_err(storage_err)?;

    let mut messages = Vec::new();
    for row in rows {
        let (sender, text, timestamp) = row.map_err(storage_err)?;
        let sender = Sender::parse(&sender)
            .ok_or_else(|| TrakshipError::Storage(format!("Unknown sender: {}", sender)))?;
        messages.push(Message {
            sender,
            text,
            timestamp: to_datetime(timestamp),
        });
    }
    Ok(messages)
}

/// Persistence for the FAQ catalog.
pub struct FaqRepository {
    db: Arc<Database>,
}

impl FaqRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert the given entries only if the catalog is empty.
    ///
    /// Returns the number of entries inserted (zero when the catalog is
    /// already populated).
    pub fn seed_if_empty(&self, entries: &[FaqEntry]) -> Result<usize> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM faqs", [], |row| row.get(0))
                .map_err(storage_err)?;
            if count > 0 {
                return Ok(0);
            }

            let tx = conn.unchecked_transaction().map_err(storage_err)?;
            for entry in entries {
                let keywords = serde_json::to_string(&entry.keywords)?;
                tx.execute(
                    "INSERT INTO faqs (id, question, keywords, answer, category, priority, active)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        entry.id.to_string(),
                        entry.question,
                        keywords,
                        entry.answer,
                        entry.category.as_str(),
                        entry.priority,
                        entry.active as i64,
                    ],
                )
                .map_err(storage_err)?;
            }
            tx.commit().map_err(storage_err)?;

            debug!("Seeded {} FAQ entries", entries.len());
            Ok(entries.len())
        })
    }

    /// All active entries, highest priority first. Within a priority tier
    /// entries keep insertion order so ties resolve deterministically.
    pub fn active_by_priority(&self) -> Result<Vec<FaqEntry>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, question, keywords, answer, category, priority, active
                     FROM faqs WHERE active = 1
                     ORDER BY priority DESC, rowid ASC",
                )
                .map_err(storage_err)?;

            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, i64>(5)?,
                        row.get::<_, i64>(6)?,
                    ))
                })
                .map_err(storage_err)?;

            let mut entries = Vec::new();
            for row in rows {
                let (id, question, keywords, answer, category, priority, active) =
                    row.map_err(storage_err)?;
                let id = Uuid::parse_str(&id)
                    .map_err(|e| TrakshipError::Storage(format!("Bad faq id: {}", e)))?;
                let category = FaqCategory::parse(&category).ok_or_else(|| {
                    TrakshipError::Storage(format!("Unknown faq category: {}", category))
                })?;
                entries.push(FaqEntry {
                    id,
                    question,
                    keywords: serde_json::from_str(&keywords)?,
                    answer,
                    category,
                    priority,
                    active: active != 0,
                });
            }
            Ok(entries)
        })
    }

    pub fn count(&self) -> Result<i64> {
        self.db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM faqs", [], |row| row.get(0))
                .map_err(storage_err)
        })
    }
}

/// Persistence for registered users.
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(&self, user: &User, password_hash: &str) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, email, phone, address, city, state, pincode,
                                    password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    user.id.to_string(),
                    user.name,
                    user.email,
                    user.phone,
                    user.address,
                    user.city,
                    user.state,
                    user.pincode,
                    password_hash,
                    user.created_at.timestamp(),
                ],
            )
            .map_err(storage_err)?;
            Ok(())
        })
    }

    pub fn email_exists(&self, email: &str) -> Result<bool> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM users WHERE email = ?1",
                    params![email],
                    |row| row.get(0),
                )
                .map_err(storage_err)?;
            Ok(count > 0)
        })
    }

    /// Look up a user by email, returning the user and their password hash.
    pub fn find_by_email(&self, email: &str) -> Result<Option<(User, String)>> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, email, phone, address, city, state, pincode,
                        password_hash, created_at
                 FROM users WHERE email = ?1",
                params![email],
                |row| {
                    let hash: String = row.get(8)?;
                    Ok((user_row(row)?, hash))
                },
            )
            .optional()
            .map_err(storage_err)
        })
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, email, phone, address, city, state, pincode,
                        password_hash, created_at
                 FROM users WHERE id = ?1",
                params![id.to_string()],
                user_row,
            )
            .optional()
            .map_err(storage_err)
        })
    }
}

fn user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    Ok(User {
        id: Uuid::parse_str(&id).unwrap_or_default(),
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
        city: row.get(5)?,
        state: row.get(6)?,
        pincode: row.get(7)?,
        created_at: to_datetime(row.get(9)?),
    })
}

/// Persistence for opaque bearer tokens.
pub struct TokenRepository {
    db: Arc<Database>,
}

impl TokenRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a freshly issued token with the given lifetime.
    pub fn insert(&self, token: &str, user_id: Uuid, ttl_hours: i64) -> Result<()> {
        let expires_at = (Utc::now() + Duration::hours(ttl_hours)).timestamp();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO auth_tokens (token, user_id, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![token, user_id.to_string(), Utc::now().timestamp(), expires_at],
            )
            .map_err(storage_err)?;
            Ok(())
        })
    }

    /// Resolve a token to its user. Expired tokens resolve to `None`.
    pub fn find_user(&self, token: &str) -> Result<Option<Uuid>> {
        self.db.with_conn(|conn| {
            let user_id: Option<String> = conn
                .query_row(
                    "SELECT user_id FROM auth_tokens
                     WHERE token = ?1 AND expires_at > ?2",
                    params![token, Utc::now().timestamp()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(storage_err)?;
            Ok(user_id.and_then(|s| Uuid::parse_str(&s).ok()))
        })
    }
}
