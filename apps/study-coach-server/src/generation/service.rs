//! Generation service
//!
//! Orchestrates prompt construction, the provider call and extraction.

use std::sync::Arc;

use super::{
    extract::{extract_material, GenerationOutcome},
    prompt::build_prompt,
    provider::CompletionProvider,
    GenerationError,
};

/// Turns notes into study material
#[derive(Clone)]
pub struct GenerationService {
    provider: Arc<dyn CompletionProvider>,
}

impl GenerationService {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generate flashcards and quiz questions from `notes`
    pub async fn generate(&self, notes: &str) -> Result<GenerationOutcome, GenerationError> {
        let prompt = build_prompt(notes);
        tracing::debug!(
            "Requesting study material from {} ({} chars of notes)",
            self.provider.name(),
            notes.len()
        );

        let raw = self.provider.complete(&prompt).await?;
        Ok(extract_material(&raw))
    }
}
