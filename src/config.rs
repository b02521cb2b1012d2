//! Configuration, read from the environment.

use secrecy::SecretString;

use crate::classifier::LabelPolicy;
use crate::error::ConfigError;
use crate::model::{ModelBackend, ModelConfig};

const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Triage configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Which hosted model backend serves the fallback stage.
    pub backend: ModelBackend,
    /// API key for that backend.
    pub api_key: SecretString,
    /// Model identifier.
    pub model: String,
    /// How to treat model labels outside the known category set.
    pub label_policy: LabelPolicy,
}

impl TriageConfig {
    /// Read configuration from the environment.
    ///
    /// - `MAIL_TRIAGE_BACKEND`: "anthropic" (default) or "openai"
    /// - `ANTHROPIC_API_KEY` / `OPENAI_API_KEY`: key for the chosen backend
    /// - `MAIL_TRIAGE_MODEL`: model id (backend-specific default)
    /// - `MAIL_TRIAGE_LABEL_POLICY`: "coerce" (default) or "reject"
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match std::env::var("MAIL_TRIAGE_BACKEND")
            .unwrap_or_else(|_| "anthropic".to_string())
            .to_lowercase()
            .as_str()
        {
            "anthropic" => ModelBackend::Anthropic,
            "openai" => ModelBackend::OpenAi,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "MAIL_TRIAGE_BACKEND".into(),
                    message: format!("unknown backend '{other}' (expected anthropic or openai)"),
                });
            }
        };

        let (key_var, default_model) = match backend {
            ModelBackend::Anthropic => ("ANTHROPIC_API_KEY", DEFAULT_ANTHROPIC_MODEL),
            ModelBackend::OpenAi => ("OPENAI_API_KEY", DEFAULT_OPENAI_MODEL),
        };
        let api_key = std::env::var(key_var)
            .map(SecretString::from)
            .map_err(|_| ConfigError::MissingEnvVar(key_var.to_string()))?;

        let model =
            std::env::var("MAIL_TRIAGE_MODEL").unwrap_or_else(|_| default_model.to_string());

        let label_policy = match std::env::var("MAIL_TRIAGE_LABEL_POLICY")
            .unwrap_or_else(|_| "coerce".to_string())
            .to_lowercase()
            .as_str()
        {
            "coerce" => LabelPolicy::Coerce,
            "reject" => LabelPolicy::Reject,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "MAIL_TRIAGE_LABEL_POLICY".into(),
                    message: format!("unknown policy '{other}' (expected coerce or reject)"),
                });
            }
        };

        Ok(Self {
            backend,
            api_key,
            model,
            label_policy,
        })
    }

    /// The model-layer slice of this configuration.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            backend: self.backend,
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}
