//! Extract → generate → commit.
//!
//! Every failure after startup ends in a terminal [`Outcome`]; nothing here
//! returns an error to the caller.

use std::fmt;

use tracing::{debug, info};

use crate::git::{self, VersionControl};
use crate::message::{CommitMessage, MessageGenerator};
use crate::openai::CompletionClient;

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing staged, or the staged diff could not be read.
    NoChanges,
    /// No usable message came back from the model.
    GenerationFailed,
    /// `git commit` failed; history is unchanged.
    CommitFailed(CommitMessage),
    Committed(CommitMessage),
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed(_))
    }

    /// One-line report for the operator.
    pub fn summary(&self) -> &'static str {
        match self {
            Outcome::NoChanges => "No changes to commit.",
            Outcome::GenerationFailed => "Failed to generate commit message.",
            Outcome::CommitFailed(_) => "Failed to create commit.",
            Outcome::Committed(_) => "Commit created successfully!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.summary())
    }
}

/// Run the pipeline once.
pub async fn run<V, C>(vcs: &V, generator: &MessageGenerator<C>) -> Outcome
where
    V: VersionControl + ?Sized,
    C: CompletionClient,
{
    let Some(changes) = git::extract(vcs).await else {
        info!("No staged changes");
        return Outcome::NoChanges;
    };
    debug!("Extracted {} bytes of staged changes", changes.as_str().len());

    let Some(message) = generator.generate(&changes).await else {
        return Outcome::GenerationFailed;
    };

    info!("Generated commit message:\n{}", message);

    match git::apply(vcs, &message).await {
        Ok(()) => Outcome::Committed(message),
        Err(_) => Outcome::CommitFailed(message),
    }
}
