//! Study material generation route

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::Result;
use crate::generation::GenerationOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}

/// Generate flashcards and a quiz from notes
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationOutcome>> {
    let outcome = state.generation().generate(&request.text).await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use crate::generation::StaticProvider;
    use crate::routes::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_generate_returns_parsed_json() {
        let app = test_app_with(StaticProvider::replying(
            r#"```json
{"flashcards": [{"question": "q", "answer": "a"}], "quiz": []}
```"#,
        ))
        .await;

        let response = send(&app, "POST", "/generate", None, Some(json!({"text": "notes"}))).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({"flashcards": [{"question": "q", "answer": "a"}], "quiz": []})
        );
    }

    #[tokio::test]
    async fn test_generate_invalid_json_payload() {
        let app = test_app_with(StaticProvider::replying("I cannot do that")).await;

        let response = send(&app, "POST", "/generate", None, Some(json!({"text": "notes"}))).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({"error": "AI returned invalid JSON", "raw": "I cannot do that"})
        );
    }

    #[tokio::test]
    async fn test_generate_upstream_failure() {
        let app = test_app_with(StaticProvider::failing(503)).await;

        let response = send(&app, "POST", "/generate", None, Some(json!({"text": "notes"}))).await;
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.json()["error"], "generation_error");
    }
}
