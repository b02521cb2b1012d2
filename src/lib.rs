//! mail-triage — two-stage email categorization core.
//!
//! A cheap deterministic keyword classifier runs first; a model-backed
//! classifier is consulted only when the keyword pass is ambiguous or silent.
//! Mail fetching, HTTP routing, and auth live elsewhere — collaborators hand
//! this crate (subject, body) and get a category label back.

pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
