//! Categorization orchestrator — the keyword → gate → model pipeline.
//!
//! A two-node decision workflow: the keyword classifier runs first; only
//! when it yields no unambiguous signal is the model classifier invoked.
//! Exactly one classifier decides per request — no retries, no merging of
//! signals across calls.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::classifier::keywords::KeywordClassifier;
use crate::classifier::types::{Category, EmailInput};
use crate::error::TriageError;
use crate::model::{CategoryVerdict, ModelClassifier};

/// What to do when the model returns a label outside the known category set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Map the label to `Category::Unknown` (with a warning log).
    #[default]
    Coerce,
    /// Surface `TriageError::UnrecognizedLabel` to the caller.
    Reject,
}

/// Two-stage categorizer: keyword search, then model fallback.
///
/// Each call is independent and stateless across calls; concurrent requests
/// share nothing mutable. Only the model invocation suspends.
pub struct Categorizer {
    keywords: KeywordClassifier,
    model: Arc<dyn ModelClassifier>,
    label_policy: LabelPolicy,
}

impl Categorizer {
    pub fn new(model: Arc<dyn ModelClassifier>) -> Self {
        Self {
            keywords: KeywordClassifier::new(),
            model,
            label_policy: LabelPolicy::default(),
        }
    }

    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    /// Categorize an email. Never returns an "undecided" value: a silent or
    /// ambiguous keyword pass falls through to the model classifier.
    ///
    /// Model transport failures are wrapped as
    /// `TriageError::ClassificationUnavailable` so callers can distinguish
    /// "could not determine a category" from "the category is X".
    pub async fn categorize(&self, input: &EmailInput) -> Result<Category, TriageError> {
        // Stage 1: keyword search (pure computation, never suspends)
        if let Some(category) = self.keywords.classify(input) {
            debug!(
                category = %category,
                "Keyword classifier decided — skipping model fallback"
            );
            return Ok(category);
        }

        // Gate failed: no unambiguous keyword signal.
        debug!("No unambiguous keyword signal — invoking model fallback");

        // Stage 2: model fallback (the only suspension point)
        let verdict = self.model.classify(input).await.map_err(|e| {
            warn!(model = self.model.model_name(), error = %e, "Model fallback failed");
            TriageError::ClassificationUnavailable {
                reason: e.to_string(),
            }
        })?;

        self.resolve_label(&verdict)
    }

    /// Blocking entry point with identical decision logic.
    ///
    /// Spins up a throwaway current-thread runtime for the model call. Must
    /// not be called from inside an async context — use `categorize` there.
    pub fn categorize_blocking(&self, input: &EmailInput) -> Result<Category, TriageError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TriageError::Runtime(e.to_string()))?;
        rt.block_on(self.categorize(input))
    }

    /// Resolve the model's free-form label under the configured policy.
    fn resolve_label(&self, verdict: &CategoryVerdict) -> Result<Category, TriageError> {
        match Category::from_label(&verdict.category) {
            Some(category) => {
                info!(
                    category = %category,
                    model = self.model.model_name(),
                    reasoning = %verdict.reasoning,
                    "Model fallback decided"
                );
                Ok(category)
            }
            None => match self.label_policy {
                LabelPolicy::Coerce => {
                    warn!(
                        label = %verdict.category,
                        "Unrecognized model label — coercing to unknown"
                    );
                    Ok(Category::Unknown)
                }
                LabelPolicy::Reject => Err(TriageError::UnrecognizedLabel {
                    label: verdict.category.clone(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::ModelError;

    /// Stub model classifier returning a canned label, counting invocations.
    struct StubModel {
        label: String,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn returning(label: &str) -> Arc<Self> {
            Arc::new(Self {
                label: label.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ModelClassifier for StubModel {
        fn model_name(&self) -> &str {
            "stub"
        }

        async fn classify(&self, _input: &EmailInput) -> Result<CategoryVerdict, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CategoryVerdict {
                category: self.label.clone(),
                reasoning: "stub reasoning".into(),
            })
        }
    }

    /// Stub that always fails at the transport level.
    struct FailingModel;

    #[async_trait]
    impl ModelClassifier for FailingModel {
        fn model_name(&self) -> &str {
            "failing-stub"
        }

        async fn classify(&self, _input: &EmailInput) -> Result<CategoryVerdict, ModelError> {
            Err(ModelError::RequestFailed {
                provider: "stub".into(),
                reason: "connection refused".into(),
            })
        }
    }

    #[tokio::test]
    async fn keyword_hit_skips_model() {
        let stub = StubModel::returning("others");
        let categorizer = Categorizer::new(stub.clone());
        let input = EmailInput::new("Update", "We regret to inform you of our decision.");

        let category = categorizer.categorize(&input).await.unwrap();
        assert_eq!(category, Category::Rejected);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ambiguous_keywords_fall_through_to_model() {
        let stub = StubModel::returning("accepted");
        let categorizer = Categorizer::new(stub.clone());
        // accepted + action_required signals at once
        let input = EmailInput::new("Offer", "Congratulations! Next steps to follow.");

        let category = categorizer.categorize(&input).await.unwrap();
        assert_eq!(category, Category::Accepted);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn silent_keywords_fall_through_to_model() {
        let stub = StubModel::returning("others");
        let categorizer = Categorizer::new(stub.clone());
        let input = EmailInput::new("Lunch", "Pizza on Friday?");

        let category = categorizer.categorize(&input).await.unwrap();
        assert_eq!(category, Category::Others);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unrecognized_label_coerced_to_unknown_by_default() {
        let stub = StubModel::returning("spam");
        let categorizer = Categorizer::new(stub);
        let input = EmailInput::new("", "no keywords here");

        let category = categorizer.categorize(&input).await.unwrap();
        assert_eq!(category, Category::Unknown);
    }

    #[tokio::test]
    async fn unrecognized_label_rejected_under_reject_policy() {
        let stub = StubModel::returning("spam");
        let categorizer = Categorizer::new(stub).with_label_policy(LabelPolicy::Reject);
        let input = EmailInput::new("", "no keywords here");

        let err = categorizer.categorize(&input).await.unwrap_err();
        match err {
            TriageError::UnrecognizedLabel { label } => assert_eq!(label, "spam"),
            other => panic!("Expected UnrecognizedLabel, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn model_label_parsing_is_lenient_about_case() {
        let stub = StubModel::returning(" Action_Required ");
        let categorizer = Categorizer::new(stub);
        let input = EmailInput::new("", "no keywords here");

        let category = categorizer.categorize(&input).await.unwrap();
        assert_eq!(category, Category::ActionRequired);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_classification_unavailable() {
        let categorizer = Categorizer::new(Arc::new(FailingModel));
        let input = EmailInput::new("", "no keywords here");

        let err = categorizer.categorize(&input).await.unwrap_err();
        assert!(matches!(
            err,
            TriageError::ClassificationUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn keyword_path_never_touches_a_failing_model() {
        let categorizer = Categorizer::new(Arc::new(FailingModel));
        let input = EmailInput::new("", "We received your application.");

        let category = categorizer.categorize(&input).await.unwrap();
        assert_eq!(category, Category::Confirmation);
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let stub = StubModel::returning("others");
        let categorizer = Categorizer::new(stub);
        let input = EmailInput::new("Hi", "nothing matches here");

        let first = categorizer.categorize(&input).await.unwrap();
        let second = categorizer.categorize(&input).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn blocking_entry_point_matches_async_logic() {
        let stub = StubModel::returning("others");
        let categorizer = Categorizer::new(stub.clone());

        let keyword_hit = EmailInput::new("", "unfortunately, we went another way");
        assert_eq!(
            categorizer.categorize_blocking(&keyword_hit).unwrap(),
            Category::Rejected
        );

        let fallback = EmailInput::new("", "nothing matches here");
        assert_eq!(
            categorizer.categorize_blocking(&fallback).unwrap(),
            Category::Others
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }
}
