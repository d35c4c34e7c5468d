//! Account API routes

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, verify_password, AuthUser};
use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Register/login request
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Issued token plus the account name
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
}

/// Create the account router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// Create an account and sign it in
async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let users = UserRepository::new(state.db());
    if users.find_by_username(&credentials.username).await?.is_some() {
        return Err(AppError::BadRequest("Username already exists".to_string()));
    }

    let password_hash =
        hash_password(&credentials.password, state.config().auth.bcrypt_cost).await?;
    let user = users.create(&credentials.username, &password_hash).await?;
    tracing::info!("Registered user {}", user.id);

    let token = state.tokens().issue(&user.id)?;
    Ok(Json(AuthResponse {
        token,
        username: user.username,
    }))
}

/// Exchange credentials for a token
async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>> {
    let user = UserRepository::new(state.db())
        .find_by_username(&credentials.username)
        .await?
        .ok_or_else(|| AppError::BadRequest(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&credentials.password, &user.password_hash).await? {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.tokens().issue(&user.id)?;
    Ok(Json(AuthResponse {
        token,
        username: user.username,
    }))
}

/// The authenticated account
async fn me(user: AuthUser) -> Json<MeResponse> {
    let AuthUser(user) = user;
    Json(MeResponse {
        id: user.id,
        username: user.username,
    })
}

#[cfg(test)]
mod tests {
    use crate::auth::{Claims, TokenService};
    use crate::config::Config;
    use crate::routes::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_login_me() {
        let app = test_app().await;

        let registered = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"username": "alice", "password": "s3cret"})),
        )
        .await;
        assert_eq!(registered.status, StatusCode::OK);
        assert_eq!(registered.json()["username"], "alice");

        let login = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"username": "alice", "password": "s3cret"})),
        )
        .await;
        assert_eq!(login.status, StatusCode::OK);
        let token = login.json()["token"].as_str().unwrap().to_string();

        let me = send(&app, "GET", "/me", Some(&token), None).await;
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.json()["username"], "alice");
        assert!(me.json()["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let app = test_app().await;
        register(&app, "alice").await;

        let again = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"username": "alice", "password": "other"})),
        )
        .await;
        assert_eq!(again.status, StatusCode::BAD_REQUEST);
        assert_eq!(again.json()["detail"], "Username already exists");
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let app = test_app().await;
        register(&app, "alice").await;

        for (username, password) in [("alice", "wrong"), ("nobody", "pw")] {
            let response = send(
                &app,
                "POST",
                "/login",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.json()["detail"], "Invalid username or password");
        }
    }

    #[tokio::test]
    async fn test_me_rejections() {
        let app = test_app().await;

        let missing = send(&app, "GET", "/me", None, None).await;
        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
        assert_eq!(missing.json()["detail"], "No auth header");

        let invalid = send(&app, "GET", "/me", Some("garbage"), None).await;
        assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.json()["detail"], "Invalid token");

        // Well-signed token for an account that does not exist
        let orphan = TokenService::new(&Config::default().auth)
            .issue("no-such-user")
            .unwrap();
        let not_found = send(&app, "GET", "/me", Some(&orphan), None).await;
        assert_eq!(not_found.status, StatusCode::UNAUTHORIZED);
        assert_eq!(not_found.json()["detail"], "User not found");
    }

    #[tokio::test]
    async fn test_malformed_header() {
        use axum::body::Body;
        use axum::http::{header, Request};
        use tower::ServiceExt;

        let app = test_app().await;
        let request = Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let app = test_app().await;
        let token = register(&app, "alice").await;
        let claims = TokenService::new(&Config::default().auth)
            .verify(&token)
            .unwrap();

        let expired = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &Claims {
                user_id: claims.user_id,
                exp: chrono::Utc::now().timestamp() - 3600,
            },
            &jsonwebtoken::EncodingKey::from_secret(Config::default().auth.jwt_secret.as_bytes()),
        )
        .unwrap();

        let response = send(&app, "GET", "/me", Some(&expired), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.json()["detail"], "Token expired");
    }

    #[tokio::test]
    async fn test_empty_username_rejected() {
        let app = test_app().await;
        let response = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"username": "  ", "password": "pw"})),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
