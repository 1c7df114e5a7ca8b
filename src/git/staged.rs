//! Staged change extraction.

use std::fmt;

use tracing::{debug, error};

use super::VersionControl;

/// The staged diff for this run. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet(String);

impl ChangeSet {
    /// Wrap diff text, returning `None` when there is nothing staged.
    pub fn new(diff: impl Into<String>) -> Option<Self> {
        let diff = diff.into();
        if diff.trim().is_empty() {
            None
        } else {
            Some(Self(diff))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the staged change set.
///
/// A failing `git diff --cached` is logged and reported as no changes.
pub async fn extract<V: VersionControl + ?Sized>(vcs: &V) -> Option<ChangeSet> {
    match vcs.staged_diff().await {
        Ok(diff) => {
            debug!("Staged diff: {} bytes", diff.len());
            ChangeSet::new(diff)
        }
        Err(e) => {
            error!("Error getting staged diff: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitError;
    use crate::git::MockVersionControl;

    #[test]
    fn test_change_set_rejects_blank_text() {
        assert!(ChangeSet::new("").is_none());
        assert!(ChangeSet::new("  \n\t\n").is_none());
    }

    #[test]
    fn test_change_set_keeps_exact_text() {
        let diff = "diff --git a/x b/x\n+line\n";
        let changes = ChangeSet::new(diff).unwrap();
        assert_eq!(changes.as_str(), diff);
    }

    #[tokio::test]
    async fn test_extract_returns_diff() {
        let mut mock = MockVersionControl::new();
        mock.expect_staged_diff()
            .times(1)
            .returning(|| Ok("+line\n".to_string()));

        let changes = extract(&mock).await.unwrap();
        assert_eq!(changes.as_str(), "+line\n");
    }

    #[tokio::test]
    async fn test_extract_empty_diff_is_none() {
        let mut mock = MockVersionControl::new();
        mock.expect_staged_diff()
            .times(1)
            .returning(|| Ok(String::new()));

        assert!(extract(&mock).await.is_none());
    }

    #[tokio::test]
    async fn test_extract_git_failure_is_none() {
        let mut mock = MockVersionControl::new();
        mock.expect_staged_diff().times(1).returning(|| {
            Err(GitError::Extraction {
                stderr: "fatal: not a git repository".to_string(),
            })
        });

        assert!(extract(&mock).await.is_none());
    }
}
