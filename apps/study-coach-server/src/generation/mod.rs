//! Study material generation
//!
//! Sends the user's notes to a remote language model with a fixed prompt
//! and returns the structured JSON it produces.
//!
//! When the model's reply is not valid JSON the request still succeeds:
//! the caller gets a diagnostic payload carrying the cleaned raw text.
//! Only transport or upstream HTTP failures are errors.

mod extract;
mod prompt;
mod provider;
mod service;

pub use extract::GenerationOutcome;
pub use provider::{CompletionProvider, OpenRouterProvider};
pub use service::GenerationService;

#[cfg(test)]
pub use provider::StaticProvider;

use thiserror::Error;

/// Generation failures
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key configured for the generation provider")]
    MissingApiKey,

    #[error("Failed to reach the generation provider: {0}")]
    Transport(String),

    #[error("Generation provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response from the generation provider: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey | Self::MalformedResponse(_) => false,
        }
    }
}
