//! Study session database operations
//!
//! `content` is stored as JSON text and handed back verbatim, key order
//! included. Nothing here interprets it.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;

/// Study session record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySession {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub input_text: String,
    pub content: Value,
    /// Unix seconds, fractional
    pub updated_at: f64,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_id: String,
    title: String,
    input_text: String,
    content: String,
    updated_at: f64,
}

impl TryFrom<SessionRow> for StudySession {
    type Error = serde_json::Error;

    fn try_from(row: SessionRow) -> std::result::Result<Self, Self::Error> {
        Ok(StudySession {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            input_text: row.input_text,
            content: serde_json::from_str(&row.content)?,
            updated_at: row.updated_at,
        })
    }
}

/// Session repository
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new session for a user
    pub async fn save(
        &self,
        user_id: &str,
        title: &str,
        input_text: &str,
        content: &Value,
    ) -> Result<StudySession> {
        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            input_text: input_text.to_string(),
            content: content.clone(),
            updated_at: unix_seconds(),
        };

        sqlx::query(
            r#"
            INSERT INTO study_sessions (id, user_id, title, input_text, content, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.title)
        .bind(&session.input_text)
        .bind(serde_json::to_string(content)?)
        .bind(session.updated_at)
        .execute(self.pool)
        .await?;

        tracing::debug!("Saved session {} for user {}", session.id, user_id);
        Ok(session)
    }

    /// Most recently updated session for a user
    pub async fn latest(&self, user_id: &str) -> Result<Option<StudySession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, title, input_text, content, updated_at
            FROM study_sessions
            WHERE user_id = ?
            ORDER BY updated_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(StudySession::try_from).transpose()?)
    }

    /// All sessions for a user, newest first
    pub async fn list(&self, user_id: &str) -> Result<Vec<StudySession>> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, title, input_text, content, updated_at
            FROM study_sessions
            WHERE user_id = ?
            ORDER BY updated_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let sessions = rows
            .into_iter()
            .map(StudySession::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    /// Delete a session owned by `user_id`. Returns false if no such session.
    pub async fn delete(&self, user_id: &str, session_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM study_sessions WHERE id = ? AND user_id = ?")
            .bind(session_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn unix_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
