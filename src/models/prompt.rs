//! Composed prompt output types.

use serde::{Deserialize, Serialize};

/// Generation parameters attached to a prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// A ready-to-send prompt pair. Request-scoped, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Identifier of the template the pair was composed from.
    pub template_id: String,
    pub model: ModelConfig,
}
