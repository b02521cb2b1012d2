//! The two-stage categorization pipeline.
//!
//! Flow:
//! 1. Keyword classifier (fast, no model call) → may decide outright
//! 2. Gate: no unambiguous keyword signal → model fallback
//! 3. Model classifier → final label

pub mod keywords;
pub mod orchestrator;
pub mod types;

pub use keywords::KeywordClassifier;
pub use orchestrator::{Categorizer, LabelPolicy};
pub use types::{Category, EmailInput, KeywordRule};
