//! Configuration management for the Study Coach server

use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported JWT algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),
}

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite:./study_coach.db";
const DEFAULT_JWT_SECRET: &str = "supersecret";
const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24 * 7;
const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
const DEFAULT_GENERATION_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_GENERATION_MODEL: &str = "deepseek/deepseek-chat";
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
const DEFAULT_GENERATION_RETRIES: u32 = 2;

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                cors_origins: default_cors_origins(),
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
            },
            auth: AuthConfig {
                jwt_secret: DEFAULT_JWT_SECRET.to_string(),
                jwt_algorithm: default_algorithm(),
                token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
                bcrypt_cost: DEFAULT_BCRYPT_COST,
            },
            generation: GenerationConfig {
                base_url: DEFAULT_GENERATION_URL.to_string(),
                api_key: None,
                model: DEFAULT_GENERATION_MODEL.to_string(),
                timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
                max_retries: DEFAULT_GENERATION_RETRIES,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_algorithm = parse_algorithm(
            &env::var("JWT_ALGO").unwrap_or_else(|_| "HS256".to_string()),
        )?;

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_or("SERVER_PORT", DEFAULT_PORT),
                cors_origins: env::var("CORS_ORIGINS")
                    .ok()
                    .map(|raw| parse_origins(&raw))
                    .filter(|origins| !origins.is_empty())
                    .unwrap_or_else(default_cors_origins),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                    tracing::warn!("JWT_SECRET not set, falling back to the built-in development secret");
                    DEFAULT_JWT_SECRET.to_string()
                }),
                jwt_algorithm,
                token_ttl_secs: parse_or("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS),
                bcrypt_cost: parse_or("BCRYPT_COST", DEFAULT_BCRYPT_COST),
            },
            generation: GenerationConfig {
                base_url: env::var("OPENROUTER_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GENERATION_URL.to_string()),
                api_key: env::var("OPENROUTER_API_KEY").ok().filter(|key| !key.is_empty()),
                model: env::var("GENERATION_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
                timeout_secs: parse_or("GENERATION_TIMEOUT_SECS", DEFAULT_GENERATION_TIMEOUT_SECS),
                max_retries: parse_or("GENERATION_MAX_RETRIES", DEFAULT_GENERATION_RETRIES),
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Only HMAC algorithms make sense with a shared secret
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(raw.trim()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::UnsupportedAlgorithm(raw.to_string())),
    }
}
