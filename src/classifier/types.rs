//! Shared types for the categorization pipeline.

use serde::{Deserialize, Serialize};

// ── Email input ─────────────────────────────────────────────────────

/// A single email handed to the pipeline, constructed per request.
///
/// The body must already be plain text — HTML/multipart extraction is the
/// mail provider's job. Providers that cannot extract a full body pass the
/// short snippet instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailInput {
    /// Subject line.
    pub subject: String,
    /// Decoded plain-text body (or snippet fallback).
    pub body: String,
}

impl EmailInput {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

// ── Category ────────────────────────────────────────────────────────

/// The finite label set a classified email is assigned to.
///
/// There is deliberately no "undecided" variant here: the keyword stage
/// signals "no unambiguous match" through `Option<Category>`, so an
/// undecided sentinel can never reach a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Application rejected or position filled/closed.
    Rejected,
    /// Offer extended.
    Accepted,
    /// Recruiter/employer asks for something: scheduling, assessment,
    /// verification, etc.
    ActionRequired,
    /// Application received / under review.
    Confirmation,
    /// Not related to job applications at all.
    Others,
    /// Job related but not categorizable.
    Unknown,
}

impl Category {
    /// Wire label (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
            Self::ActionRequired => "action_required",
            Self::Confirmation => "confirmation",
            Self::Others => "others",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a free-form label from the model classifier.
    ///
    /// Case-insensitive, whitespace-trimmed. Returns `None` for anything
    /// outside the known set — the orchestrator's label policy decides what
    /// happens then.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "rejected" => Some(Self::Rejected),
            "accepted" => Some(Self::Accepted),
            "action_required" => Some(Self::ActionRequired),
            "confirmation" => Some(Self::Confirmation),
            "others" => Some(Self::Others),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Keyword rule ────────────────────────────────────────────────────

/// A category paired with its ordered set of lowercase substring patterns.
///
/// Rule sets are static, process-wide, read-only configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub category: Category,
    pub patterns: &'static [&'static str],
}

impl KeywordRule {
    /// True if at least one pattern occurs in the (already lowercased) text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.patterns.iter().any(|p| lowered.contains(p))
    }
}
