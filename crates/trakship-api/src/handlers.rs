//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its inputs via axum extractors, talks to the
//! repositories and the response engine, and returns JSON. Wire field
//! names are camelCase to match the frontend widget.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use trakship_chat::{catalog, generate_session_id};
use trakship_core::types::{ChatSession, Message, Sender, User};
use trakship_storage::{TokenRepository, UserRepository};

use crate::auth::{self, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub total_sessions: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            city: user.city,
            state: user.state,
            pincode: user.pincode,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserView,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStartResponse {
    pub session_id: String,
    pub message: String,
    pub quick_replies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    pub response: String,
    pub quick_replies: Vec<String>,
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageView {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(msg: Message) -> Self {
        Self {
            sender: msg.sender,
            text: msg.text,
            timestamp: msg.timestamp,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<MessageView>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub messages: Vec<MessageView>,
}

impl From<ChatSession> for SessionView {
    fn from(session: ChatSession) -> Self {
        Self {
            session_id: session.session_id,
            created_at: session.created_at,
            last_activity: session.last_activity,
            messages: session.messages.into_iter().map(MessageView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let total_sessions = state.sessions().count()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        total_sessions,
    }))
}

/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let fields = [
        &req.name,
        &req.email,
        &req.phone,
        &req.address,
        &req.city,
        &req.state,
        &req.pincode,
        &req.password,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    let users = UserRepository::new(Arc::clone(&state.database));
    if users.email_exists(&req.email)? {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = auth::hash_password(&req.password)?;
    let user = User {
        id: Uuid::new_v4(),
        name: req.name,
        email: req.email,
        phone: req.phone,
        address: req.address,
        city: req.city,
        state: req.state,
        pincode: req.pincode,
        created_at: Utc::now(),
    };
    users.create(&user, &password_hash)?;

    let token = issue_token(&state, user.id)?;
    info!("Registered user {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}

/// POST /api/signin
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if req.email.trim().is_empty() || req.password.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let users = UserRepository::new(Arc::clone(&state.database));
    // Unknown email and bad password share one message so the endpoint
    // does not reveal which emails are registered.
    let (user, hash) = users
        .find_by_email(&req.email)?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !auth::verify_password(&req.password, &hash)? {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = issue_token(&state, user.id)?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}

/// GET /api/user/profile
pub async fn profile(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let users = UserRepository::new(Arc::clone(&state.database));
    let user = users
        .find_by_id(user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse { user: user.into() }))
}

/// POST /api/chat/start
pub async fn chat_start() -> Json<ChatStartResponse> {
    Json(ChatStartResponse {
        session_id: generate_session_id(),
        message: catalog::WELCOME_MESSAGE.to_string(),
        quick_replies: catalog::quick_replies(),
    })
}

/// POST /api/chat/message
pub async fn chat_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    if req.session_id.trim().is_empty() || req.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Session ID and message are required".to_string(),
        ));
    }

    let user_id = resolve_message_user(&state, &headers, req.user_id)?;

    let response = state
        .engine
        .generate(&req.message, &req.session_id, user_id)?;

    Ok(Json(ChatMessageResponse {
        response,
        quick_replies: catalog::quick_replies(),
        session_id: req.session_id,
    }))
}

/// GET /api/chat/history/{session_id}
pub async fn chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state.sessions().history(&session_id)?;
    Ok(Json(HistoryResponse {
        history: history.into_iter().map(MessageView::from).collect(),
    }))
}

/// GET /api/chat/sessions
pub async fn chat_sessions(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<SessionsResponse>, ApiError> {
    let sessions = state
        .sessions()
        .recent_for_user(user_id, state.config.chat.max_user_sessions)?;

    Ok(Json(SessionsResponse {
        sessions: sessions.into_iter().map(SessionView::from).collect(),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

fn issue_token(state: &AppState, user_id: Uuid) -> Result<String, ApiError> {
    let token = auth::generate_token();
    TokenRepository::new(Arc::clone(&state.database)).insert(
        &token,
        user_id,
        state.config.auth.token_ttl_hours,
    )?;
    Ok(token)
}

/// Pick the user a chat message belongs to.
///
/// A `userId` in the body is honored only when that user exists, so a
/// stale widget cookie cannot break session inserts. Otherwise a valid
/// bearer token attributes the session to its owner. Anonymous is fine.
fn resolve_message_user(
    state: &AppState,
    headers: &HeaderMap,
    body_user: Option<Uuid>,
) -> Result<Option<Uuid>, ApiError> {
    if let Some(id) = body_user {
        let users = UserRepository::new(Arc::clone(&state.database));
        if users.find_by_id(id)?.is_some() {
            return Ok(Some(id));
        }
    }

    if let Some(value) = headers.get("authorization") {
        if let Ok(s) = value.to_str() {
            return auth::resolve_bearer(state, s);
        }
    }

    Ok(None)
}
