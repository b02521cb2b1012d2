//! Error types for mail-triage.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Triage error: {0}")]
    Triage(#[from] TriageError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Model classifier (fallback stage) errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Orchestrator errors.
///
/// A missing keyword match is not an error — that is the expected path into
/// the model fallback. These cover the fallback itself going wrong.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// The model fallback could not produce a category at all. Wraps the
    /// underlying transport failure so callers can tell "could not determine
    /// a category" apart from "the category is X".
    #[error("Classification unavailable: {reason}")]
    ClassificationUnavailable { reason: String },

    /// The model returned a label outside the known category set and the
    /// configured label policy rejects such labels.
    #[error("Model returned unrecognized category label: '{label}'")]
    UnrecognizedLabel { label: String },

    /// The blocking entry point failed to set up its runtime.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
