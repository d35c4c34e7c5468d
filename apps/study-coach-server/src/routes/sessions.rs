//! Study session API routes

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::db::{SessionRepository, StudySession};
use crate::error::{AppError, Result};
use crate::state::AppState;

const DEFAULT_TITLE: &str = "Untitled session";

/// Save request. `content` is stored as-is.
#[derive(Debug, Deserialize)]
pub struct SaveSessionRequest {
    pub content: Value,
    #[serde(default)]
    pub title: Option<String>,
}

/// Session as listed in history
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub input_text: String,
    pub content: Value,
    /// Unix seconds of the last save
    pub created_at: f64,
}

impl From<StudySession> for SessionSummary {
    fn from(session: StudySession) -> Self {
        Self {
            id: session.id,
            title: session.title,
            input_text: session.input_text,
            content: session.content,
            created_at: session.updated_at,
        }
    }
}

/// Create the sessions router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save_session", post(save_session))
        .route("/last_session", get(last_session))
        .route("/all_sessions", get(all_sessions))
        .route("/sessions/:session_id", delete(delete_session))
}

/// Store a new session for the current user
async fn save_session(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<SaveSessionRequest>,
) -> Result<Json<Value>> {
    let Value::Object(fields) = &request.content else {
        return Err(AppError::BadRequest("content must be a JSON object".to_string()));
    };

    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_TITLE);
    let input_text = fields
        .get("input_text")
        .and_then(Value::as_str)
        .unwrap_or_default();

    SessionRepository::new(state.db())
        .save(user.id(), title, input_text, &request.content)
        .await?;

    Ok(Json(json!({ "status": "saved" })))
}

/// Content of the most recent session, or null
async fn last_session(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>> {
    let latest = SessionRepository::new(state.db()).latest(user.id()).await?;
    let content = latest.map(|session| session.content).unwrap_or(Value::Null);

    Ok(Json(json!({ "content": content })))
}

/// Every session of the current user, newest first
async fn all_sessions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SessionSummary>>> {
    let sessions = SessionRepository::new(state.db()).list(user.id()).await?;

    Ok(Json(sessions.into_iter().map(SessionSummary::from).collect()))
}

/// Delete one of the current user's sessions
async fn delete_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> Result<Json<Value>> {
    let deleted = SessionRepository::new(state.db())
        .delete(user.id(), &session_id)
        .await?;

    if deleted {
        Ok(Json(json!({ "status": "deleted" })))
    } else {
        Err(AppError::NotFound("Session not found".to_string()))
    }
}
