//! LLM integration for WingMentor.
//!
//! Supports:
//! - **Gemini**: Generative Language API via `GeminiProvider`
//!
//! Callers work against the `LlmProvider` trait so tests can substitute a stub.

pub mod gemini;
pub mod provider;

pub use gemini::GeminiProvider;
pub use provider::*;

use std::sync::Arc;

use crate::error::LlmError;

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: secrecy::SecretString,
    pub model: String,
    pub api_base: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    if config.model.trim().is_empty() {
        return Err(LlmError::ModelNotAvailable {
            provider: "gemini".to_string(),
            model: config.model.clone(),
        });
    }

    tracing::info!("Using Gemini (model: {})", config.model);
    Ok(Arc::new(GeminiProvider::new(
        config.api_key.clone(),
        &config.model,
        &config.api_base,
    )))
}
