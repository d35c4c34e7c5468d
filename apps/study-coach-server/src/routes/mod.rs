//! Route modules for the Study Coach server
//!
//! Paths are flat (`/register`, `/save_session`, ...) to match the web
//! client.

pub mod auth;
pub mod export;
pub mod generate;
pub mod health;
pub mod sessions;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server.cors_origins);

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(sessions::router())
        .merge(generate::router())
        .merge(export::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS for the configured origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for driving the router in tests

    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::test_pool;
    use crate::generation::{CompletionProvider, GenerationService, StaticProvider};
    use crate::state::AppState;

    pub struct TestResponse {
        pub status: StatusCode,
        pub headers: HeaderMap,
        pub body: Vec<u8>,
    }

    impl TestResponse {
        pub fn json(&self) -> Value {
            serde_json::from_slice(&self.body).expect("JSON body")
        }
    }

    pub async fn test_app() -> Router {
        test_app_with(StaticProvider::replying("{}")).await
    }

    pub async fn test_app_with(provider: impl CompletionProvider + 'static) -> Router {
        let mut config = Config::default();
        config.auth.bcrypt_cost = 4;
        let generation = GenerationService::new(Arc::new(provider));
        let state = AppState::new(config, test_pool().await, generation);
        super::router(state)
    }

    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = app.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Register `username` and return its token
    pub async fn register(app: &Router, username: &str) -> String {
        let response = send(
            app,
            "POST",
            "/register",
            None,
            Some(serde_json::json!({"username": username, "password": "pw"})),
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["token"]
            .as_str()
            .expect("token")
            .to_string()
    }
}
