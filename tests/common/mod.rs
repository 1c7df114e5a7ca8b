//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use git2::{Oid, Repository, Signature};
use serde_json::{Value, json};

use commitgen::config::parse_base_url;
use commitgen::{Config, Credentials, ModelCatalog, RetryPolicy};

pub const API_KEY: &str = "sk-test";
pub const ORG_ID: &str = "org-test";

/// Config pointing at a mock server's `/v1` base.
pub fn test_config(server_uri: &str) -> Config {
    Config {
        credentials: Credentials {
            api_key: API_KEY.to_string(),
            org_id: ORG_ID.to_string(),
        },
        base_url: parse_base_url(&format!("{server_uri}/v1")).expect("valid mock server URL"),
        timeout: Duration::from_secs(5),
        models: ModelCatalog::default(),
    }
}

/// Three attempts with millisecond backoff so retries don't slow the suite down.
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        unit: Duration::from_millis(5),
    }
}

/// A chat-completion response body with one choice per text.
pub fn completion_body(texts: &[&str]) -> Value {
    let choices: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "index": i,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            })
        })
        .collect();

    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "chatgpt-4o-latest",
        "choices": choices
    })
}

/// An API error envelope.
pub fn error_body(message: &str, kind: &str) -> Value {
    json!({"error": {"message": message, "type": kind, "code": null}})
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new git repository with local identity config and an initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
            // Ignore any global hooksPath so only hooks installed here run.
            let hooks = dir.path().join(".git").join("hooks");
            config
                .set_str("core.hooksPath", &hooks.to_string_lossy())
                .expect("Failed to set hooksPath");
        }

        let test_repo = Self { dir, repo };
        test_repo.commit_file("README.md", "# test\n", "init");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file and add it to the index without committing.
    pub fn stage_file(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write test file");
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write, stage and commit a file. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        self.stage_file(name, content);

        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    pub fn head_oid(&self) -> Oid {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("HEAD should point to a commit")
            .id()
    }

    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("HEAD should point to a commit")
            .message()
            .unwrap_or_default()
            .to_string()
    }

    /// Install a `pre-commit` hook that always rejects the commit.
    #[cfg(unix)]
    pub fn install_failing_pre_commit_hook(&self) {
        use std::os::unix::fs::PermissionsExt;

        let hooks = self.dir.path().join(".git/hooks");
        std::fs::create_dir_all(&hooks).expect("Failed to create hooks dir");
        let hook = hooks.join("pre-commit");
        std::fs::write(&hook, "#!/bin/sh\necho 'rejected by hook' >&2\nexit 1\n")
            .expect("Failed to write hook");
        std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod hook");
    }
}
