//! Prompt construction for commit message generation.

use crate::git::ChangeSet;

/// Fixed instruction placed before the diff.
pub const PROMPT_PREFIX: &str = "Generate a concise commit message for the following changes:\n\n";

/// A single chat request: the active model and one user-role prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, changes: &ChangeSet) -> Self {
        Self {
            model: model.into(),
            prompt: build_prompt(changes),
        }
    }
}

/// Build the prompt for a change set.
pub fn build_prompt(changes: &ChangeSet) -> String {
    format!("{PROMPT_PREFIX}{changes}")
}
