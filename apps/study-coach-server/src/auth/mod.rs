//! Authentication
//!
//! Password hashing with bcrypt and signed, expiring bearer tokens.
//! Protected handlers take an [`AuthUser`] argument; requests without a
//! valid token are rejected before the handler runs.

mod extractor;
mod password;
mod token;

pub use extractor::AuthUser;
pub use password::{hash_password, verify_password};
pub use token::TokenService;

#[cfg(test)]
pub use token::Claims;

use thiserror::Error;

/// Authentication failures. Rejections surface as 401, internal failures as 500.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No auth header")]
    MissingHeader,

    #[error("Invalid auth header")]
    MalformedHeader,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to issue token: {0}")]
    TokenIssue(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    /// Failures on the server side rather than in the caller's credentials
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::TokenIssue(_) | Self::Hashing(_))
    }
}
