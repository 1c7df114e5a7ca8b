//! Commit message generation: prompt, retry policy and normalization.

pub mod generate;
pub mod normalize;
pub mod prompt;
pub mod retry;

pub use generate::MessageGenerator;
pub use normalize::{CommitMessage, normalize};
pub use prompt::{GenerationRequest, PROMPT_PREFIX, build_prompt};
pub use retry::{GenerationFailure, MAX_ATTEMPTS, RetryPolicy, retry_generation};
