//! Model-backed fallback classifier.
//!
//! Second stage of the pipeline — consulted only when the keyword stage
//! finds no unambiguous signal. Supports:
//! - **Anthropic**: direct API access via rig-core
//! - **OpenAI**: direct API access via rig-core
//!
//! The model is asked for a JSON object with a `category` label and a short
//! `reasoning` string; the orchestrator consumes only the label.

pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use rig::agent::Agent;
use rig::client::CompletionClient;
use rig::completion::{CompletionModel, Prompt};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;

use crate::classifier::types::EmailInput;
use crate::error::ModelError;
use crate::model::prompt::{
    MODEL_MAX_TOKENS, MODEL_TEMPERATURE, categorization_preamble, categorization_prompt,
};

/// Supported model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    Anthropic,
    OpenAi,
}

/// Configuration for creating a model classifier.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub backend: ModelBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
}

/// Structured verdict returned by the model classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryVerdict {
    /// Free-form category label. Expected to be one of the six known labels
    /// but not contractually guaranteed — the orchestrator's label policy
    /// handles anything else.
    pub category: String,
    /// Why the model chose this category. Logged, never acted on.
    #[serde(default)]
    pub reasoning: String,
}

/// External LLM-backed categorizer, the fallback stage.
///
/// The only operation in the pipeline that suspends: it performs a network
/// round trip to a hosted model endpoint. No retries, no internal timeout —
/// callers wanting bounded latency impose their own deadline.
#[async_trait]
pub trait ModelClassifier: Send + Sync {
    /// Model identifier for logging.
    fn model_name(&self) -> &str;

    /// Categorize an email, returning the model's verdict.
    async fn classify(&self, input: &EmailInput) -> Result<CategoryVerdict, ModelError>;
}

/// Create a model classifier from configuration.
pub fn create_classifier(config: &ModelConfig) -> Result<Arc<dyn ModelClassifier>, ModelError> {
    match config.backend {
        ModelBackend::Anthropic => create_anthropic_classifier(config),
        ModelBackend::OpenAi => create_openai_classifier(config),
    }
}

fn create_anthropic_classifier(
    config: &ModelConfig,
) -> Result<Arc<dyn ModelClassifier>, ModelError> {
    use rig::providers::anthropic;

    let client: rig::client::Client<anthropic::client::AnthropicExt> =
        anthropic::Client::new(config.api_key.expose_secret()).map_err(|e| {
            ModelError::RequestFailed {
                provider: "anthropic".to_string(),
                reason: format!("Failed to create Anthropic client: {}", e),
            }
        })?;

    let agent = client
        .agent(&config.model)
        .preamble(&categorization_preamble())
        .temperature(MODEL_TEMPERATURE)
        .max_tokens(MODEL_MAX_TOKENS)
        .build();
    tracing::info!("Using Anthropic (model: {})", config.model);
    Ok(Arc::new(RigClassifier::new(agent, &config.model, "anthropic")))
}

fn create_openai_classifier(config: &ModelConfig) -> Result<Arc<dyn ModelClassifier>, ModelError> {
    use rig::providers::openai;

    let client: rig::client::Client<openai::client::OpenAIResponsesExt> =
        openai::Client::new(config.api_key.expose_secret()).map_err(|e| {
            ModelError::RequestFailed {
                provider: "openai".to_string(),
                reason: format!("Failed to create OpenAI client: {}", e),
            }
        })?;

    let agent = client
        .agent(&config.model)
        .preamble(&categorization_preamble())
        .temperature(MODEL_TEMPERATURE)
        .max_tokens(MODEL_MAX_TOKENS)
        .build();
    tracing::info!("Using OpenAI (model: {})", config.model);
    Ok(Arc::new(RigClassifier::new(agent, &config.model, "openai")))
}

/// `ModelClassifier` backed by a rig-core agent.
pub struct RigClassifier<M: CompletionModel> {
    agent: Agent<M>,
    model_name: String,
    provider: &'static str,
}

impl<M: CompletionModel> RigClassifier<M> {
    pub fn new(agent: Agent<M>, model_name: &str, provider: &'static str) -> Self {
        Self {
            agent,
            model_name: model_name.to_string(),
            provider,
        }
    }
}

#[async_trait]
impl<M: CompletionModel> ModelClassifier for RigClassifier<M> {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn classify(&self, input: &EmailInput) -> Result<CategoryVerdict, ModelError> {
        let user_prompt = categorization_prompt(input);

        let raw = self
            .agent
            .prompt(user_prompt)
            .await
            .map_err(|e| ModelError::RequestFailed {
                provider: self.provider.to_string(),
                reason: e.to_string(),
            })?;

        debug!(model = %self.model_name, raw_len = raw.len(), "Model verdict received");

        parse_verdict(&raw).map_err(|reason| ModelError::InvalidResponse {
            provider: self.provider.to_string(),
            reason,
        })
    }
}

// ── Response parsing ────────────────────────────────────────────────

/// Parse the model's completion into a `CategoryVerdict`.
pub fn parse_verdict(raw: &str) -> Result<CategoryVerdict, String> {
    let json_str = extract_json_object(raw);
    let verdict: CategoryVerdict =
        serde_json::from_str(&json_str).map_err(|e| format!("JSON parse error: {e}"))?;

    if verdict.category.trim().is_empty() {
        return Err("verdict is missing a category label".into());
    }
    Ok(verdict)
}

/// Extract a JSON object from model output (handles markdown wrapping).
fn extract_json_object(text: &str) -> String {
    let trimmed = text.trim();

    // Already a JSON object
    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    // Wrapped in markdown code block
    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            let inner = after[..end].trim();
            if inner.starts_with('{') {
                return inner.to_string();
            }
        }
    }

    // Try to find object bounds
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && end > start
    {
        return trimmed[start..=end].to_string();
    }

    trimmed.to_string()
}
