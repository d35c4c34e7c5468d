//! Request extractor for authenticated routes

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::AuthError;
use crate::db::{User, UserRepository};
use crate::error::AppError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// The user a valid bearer token resolved to
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)?;

        let token = bearer_token(header)?;
        let claims = state.tokens().verify(token)?;

        let user = UserRepository::new(state.db())
            .get(&claims.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthUser(user))
    }
}

fn bearer_token(header: &str) -> Result<&str, AuthError> {
    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedHeader)
}
