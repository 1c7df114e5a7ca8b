//! Commit message generation with retry and normalization.

use tracing::{debug, error, warn};

use crate::config::ModelCatalog;
use crate::git::ChangeSet;
use crate::openai::{ChatCompletion, CompletionClient};

use super::normalize::CommitMessage;
use super::prompt::GenerationRequest;
use super::retry::{GenerationFailure, RetryPolicy, retry_generation};

/// Generates commit messages through an injected [`CompletionClient`].
pub struct MessageGenerator<C> {
    client: C,
    models: ModelCatalog,
    policy: RetryPolicy,
}

impl<C: CompletionClient> MessageGenerator<C> {
    pub fn new(client: C, models: ModelCatalog, policy: RetryPolicy) -> Self {
        Self {
            client,
            models,
            policy,
        }
    }

    /// Ask the model for a commit message describing `changes`.
    ///
    /// Returns `None` when every attempt failed, the loop was aborted by an
    /// unexpected error, or the normalized text is empty.
    pub async fn generate(&self, changes: &ChangeSet) -> Option<CommitMessage> {
        let Some(model) = self.models.active() else {
            error!("No active model in catalog of {} entries", self.models.candidates().len());
            return None;
        };

        let request = GenerationRequest::new(model, changes);
        debug!("Commit prompt length: {} chars", request.prompt.len());

        let raw = retry_generation(&self.policy, &request.model, |_| async {
            self.client
                .complete(&request.model, &request.prompt)
                .await
                .and_then(ChatCompletion::into_last_text)
        })
        .await;

        match raw {
            Ok(text) => {
                let message = CommitMessage::from_raw(&text);
                if message.is_none() {
                    warn!("Model {} returned an empty commit message", request.model);
                }
                message
            }
            Err(GenerationFailure::Exhausted {
                attempts,
                last_error,
            }) => {
                match last_error {
                    Some(e) => error!(
                        "Giving up on {} after {} attempts: {}",
                        request.model, attempts, e
                    ),
                    None => error!("Giving up on {} after {} attempts", request.model, attempts),
                }
                None
            }
            Err(GenerationFailure::Aborted { .. }) => None,
        }
    }
}
