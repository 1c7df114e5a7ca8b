//! commitgen - writes a commit message for the staged changes with an LLM and commits.
//!
//! # Overview
//!
//! commitgen reads `git diff --cached`, asks an OpenAI-compatible
//! chat-completions API for a concise commit message, cleans up the answer
//! and runs `git commit` with it.

pub mod config;
pub mod error;
pub mod git;
pub mod message;
pub mod openai;
pub mod pipeline;

// Re-export commonly used types
pub use config::{Config, Credentials, ModelCatalog, ModelSelector};
pub use error::{ConfigError, GenerationError, GitError};
pub use git::{ChangeSet, GitCli, VersionControl};
pub use message::{CommitMessage, MessageGenerator, RetryPolicy};
pub use openai::{ChatCompletion, CompletionClient, OpenAiClient};
pub use pipeline::Outcome;
