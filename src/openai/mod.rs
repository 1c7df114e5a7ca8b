//! Chat-completions API access.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub use client::OpenAiClient;

/// Trait for a single chat-completion call.
///
/// This abstraction allows substituting the HTTP client in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one user-role `prompt` to `model` and return the parsed response.
    async fn complete(&self, model: &str, prompt: &str) -> Result<ChatCompletion, GenerationError>;
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

impl<'a> ChatRequest<'a> {
    pub fn user(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// The parts of a chat-completion response commitgen reads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Build a response with one choice per text, in order.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: texts
                .into_iter()
                .map(|t| Choice {
                    message: ChoiceMessage {
                        content: Some(t.into()),
                    },
                })
                .collect(),
        }
    }

    /// Text of the last choice. A `null` content reads as empty text.
    ///
    /// The last entry is used rather than the first; with a single choice
    /// the two are the same.
    pub fn into_last_text(mut self) -> Result<String, GenerationError> {
        let choice = self
            .choices
            .pop()
            .ok_or_else(|| GenerationError::Unexpected("Response contained no choices".to_string()))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
