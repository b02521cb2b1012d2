//! Pre-model keyword classifier for fast categorization.
//!
//! Runs before the model fallback to short-circuit obvious cases: a single
//! unambiguous keyword signal is trusted outright. Silence, or signals from
//! more than one category at once, defer to the (slower, costlier) model.
//! That avoids false precision from keyword overlap, e.g. an email
//! mentioning both "assessment" and "unfortunately".

use tracing::debug;

use crate::classifier::types::{Category, EmailInput, KeywordRule};

/// Phrases announcing a rejection or a filled/closed position.
const REJECTED_PATTERNS: &[&str] = &[
    "unfortunately",
    "not move forward",
    "not to move forward",
    "not to move you forward",
    "will not be moving forward",
    "won't be moving forward",
    "not selected",
    "regret to inform you",
    "move forward with another candidate",
    "move forward with other candidates",
];

/// Phrases announcing an offer.
const ACCEPTED_PATTERNS: &[&str] = &[
    "congratulations",
    "excited to offer",
    "delighted to offer",
];

/// Phrases asking the candidate to do something: schedule, assess, verify.
const ACTION_REQUIRED_PATTERNS: &[&str] = &[
    "invite you to",
    "to chat",
    "technical assessment",
    "coding assessment",
    "coding challenge",
    "online assessment",
    "online test",
    "assessment",
    "hackerrank",
    "video interview",
    "next step",
    "next steps",
    "please provide",
    "calendly",
    "one-time pass code",
    "otp",
    "verify your email",
    "verify your account",
    "confirm your email",
];

/// Phrases acknowledging that an application was received / is under review.
const CONFIRMATION_PATTERNS: &[&str] = &[
    "received your application",
    "reviewing your application",
    "we'll review",
    "will review",
    "will reach out",
    "to receive your application",
    "application has been received",
    "application was sent",
];

/// Deterministic substring-matching categorizer, first stage of the pipeline.
///
/// Pure computation: no I/O, no mutation, same output for the same input.
/// Absence of a match is a valid outcome, not a failure.
pub struct KeywordClassifier {
    rules: [KeywordRule; 4],
}

impl KeywordClassifier {
    /// Build the classifier over the four fixed rule sets.
    pub fn new() -> Self {
        Self {
            rules: [
                KeywordRule {
                    category: Category::Rejected,
                    patterns: REJECTED_PATTERNS,
                },
                KeywordRule {
                    category: Category::Accepted,
                    patterns: ACCEPTED_PATTERNS,
                },
                KeywordRule {
                    category: Category::ActionRequired,
                    patterns: ACTION_REQUIRED_PATTERNS,
                },
                KeywordRule {
                    category: Category::Confirmation,
                    patterns: CONFIRMATION_PATTERNS,
                },
            ],
        }
    }

    /// Classify an email by keyword signal alone.
    ///
    /// Returns `Some(category)` when exactly one category's pattern list
    /// matches the body. Returns `None` both for silence (no pattern from any
    /// list) and for ambiguity (patterns from two or more lists at once) —
    /// either way the caller falls through to the model classifier.
    ///
    /// Matching is case-insensitive substring containment against the body.
    /// The subject is accepted as part of `EmailInput` but not consulted;
    /// that mirrors the shipped behavior and is flagged in DESIGN.md as an
    /// open product question rather than silently changed here.
    pub fn classify(&self, input: &EmailInput) -> Option<Category> {
        let lowered = input.body.to_lowercase();

        let mut decided = None;
        let mut matched = 0usize;
        for rule in &self.rules {
            if rule.matches(&lowered) {
                matched += 1;
                decided = Some(rule.category);
            }
        }

        match matched {
            1 => {
                debug!(
                    category = %decided.unwrap_or(Category::Unknown),
                    "Keyword signal unambiguous"
                );
                decided
            }
            0 => None,
            n => {
                debug!(categories_matched = n, "Keyword signal ambiguous");
                None
            }
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}
