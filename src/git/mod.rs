//! Git operations via the system `git` binary.
//!
//! All operations shell out with `tokio::process::Command`, inheriting the
//! user's git config, hooks and signing setup.

pub mod commit;
pub mod staged;

use std::path::PathBuf;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::GitError;

pub use commit::apply;
pub use staged::{ChangeSet, extract};

/// The two git operations the pipeline needs.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Raw text of `git diff --cached`.
    async fn staged_diff(&self) -> Result<String, GitError>;

    /// Create a commit from the index with the given message.
    async fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// Production implementation running `git` in a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    async fn run(&self, args: &[&str], operation: &'static str) -> Result<Output, GitError> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::Spawn { operation, source })
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn staged_diff(&self) -> Result<String, GitError> {
        let output = self.run(&["diff", "--cached"], "diff").await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::Extraction { stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        let output = self.run(&["commit", "-m", message], "commit").await?;

        if !output.status.success() {
            // "nothing to commit" goes to stdout, not stderr.
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let output = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::Commit { output });
        }

        Ok(())
    }
}
