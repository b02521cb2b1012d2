//! Prompt construction for the model fallback classifier.

use crate::classifier::types::EmailInput;

/// Temperature for categorization calls (deterministic-ish).
pub const MODEL_TEMPERATURE: f64 = 0.1;

/// Max tokens for the categorization call (kept tight — a label plus one
/// sentence of reasoning).
pub const MODEL_MAX_TOKENS: u64 = 512;

/// Body characters forwarded to the model (token efficiency).
const BODY_CHAR_LIMIT: usize = 4000;

/// System preamble: category definitions plus the JSON output contract.
pub fn categorization_preamble() -> String {
    "You are an email categorization engine for job-application mail. \
     Classify each email as exactly one of: \"rejected\", \"accepted\", \
     \"action_required\", \"confirmation\", \"others\", \"unknown\".\n\n\
     Definitions:\n\
     - \"confirmation\": the employer confirms your job application was received or is under review.\n\
     - \"rejected\": your application was rejected, or the position was filled or closed and you were not selected.\n\
     - \"accepted\": you are offered the position.\n\
     - \"action_required\": the recruiter/employer asks you to do something — schedule an interview, \
     complete an online assessment or take-home assignment, verify an account, or anything else \
     needing action from you. Calendar invites count.\n\
     - \"others\": unrelated to job applications or job searching.\n\
     - \"unknown\": related to job applications or job searching but not categorizable, or you are unsure.\n\n\
     Respond with ONLY a JSON object:\n\
     {\"category\": \"...\", \"reasoning\": \"...\"}\n\n\
     Rules:\n\
     - \"category\" must be one of the six labels above, verbatim\n\
     - Keep \"reasoning\" to one sentence"
        .to_string()
}

/// Build the user prompt from an email, truncating the body.
pub fn categorization_prompt(input: &EmailInput) -> String {
    let body: String = input.body.chars().take(BODY_CHAR_LIMIT).collect();

    let mut prompt = String::with_capacity(body.len() + input.subject.len() + 64);
    prompt.push_str("Categorize the following email.\n\n");
    prompt.push_str(&format!("Subject Line: {}\n", input.subject));
    prompt.push_str(&format!("Email Content:\n{}", body));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_names_all_six_labels() {
        let preamble = categorization_preamble();
        for label in [
            "rejected",
            "accepted",
            "action_required",
            "confirmation",
            "others",
            "unknown",
        ] {
            assert!(preamble.contains(label), "missing label: {label}");
        }
        assert!(preamble.contains("JSON"));
    }

    #[test]
    fn prompt_includes_subject_and_body() {
        let input = EmailInput::new("Interview availability", "Are you free Tuesday?");
        let prompt = categorization_prompt(&input);
        assert!(prompt.contains("Interview availability"));
        assert!(prompt.contains("Are you free Tuesday?"));
    }

    #[test]
    fn prompt_truncates_long_bodies() {
        let input = EmailInput::new("s", "x".repeat(10_000));
        let prompt = categorization_prompt(&input);
        assert!(prompt.len() < 4200);
    }
}
