//! Bearer token issuance and validation

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::AuthConfig;

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    /// Expiry as Unix seconds
    pub exp: i64,
}

/// Signs and verifies tokens with a shared secret
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            algorithm: config.jwt_algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs: i64::try_from(config.token_ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for `user_id` expiring after the configured lifetime
    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: Utc::now().timestamp().saturating_add(self.ttl_secs),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(self.algorithm);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn service() -> TokenService {
        TokenService::new(&Config::default().auth)
    }

    #[test]
    fn test_issue_then_verify() {
        let service = service();
        let token = service.issue("user-1").unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        // Past the default validation leeway
        let token = service
            .sign(&Claims {
                user_id: "user-1".to_string(),
                exp: Utc::now().timestamp() - 3600,
            })
            .unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let mut other = Config::default().auth;
        other.jwt_secret = "another-secret".to_string();
        let token = TokenService::new(&other).issue("user-1").unwrap();

        assert!(matches!(service().verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            service().verify("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
