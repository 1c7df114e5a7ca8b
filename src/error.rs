//! Error types for commitgen modules using thiserror.

use thiserror::Error;

/// Errors from git subprocess operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git diff --cached failed: {stderr}")]
    Extraction { stderr: String },

    #[error("git commit failed: {output}")]
    Commit { output: String },
}

/// Errors from a single chat-completion attempt.
///
/// `RateLimited` and `Api` are transient and retried with backoff.
/// `Unexpected` aborts the retry loop.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Rate limited by API{}", retry_after_secs.map_or(String::new(), |s| format!(" (retry after {s}s)")))]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("API error{}: {message}", status.map_or(String::new(), |s| format!(" (HTTP {s})")))]
    Api { status: Option<u16>, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl GenerationError {
    /// Whether another attempt should be made after this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. } | GenerationError::Api { .. }
        )
    }
}

/// Errors that abort the process before the pipeline starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("Environment variable {0} is empty")]
    EmptyVar(&'static str),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(GenerationError::RateLimited { retry_after_secs: None }.is_retryable());
        assert!(
            GenerationError::Api {
                status: Some(500),
                message: "boom".to_string()
            }
            .is_retryable()
        );
        assert!(!GenerationError::Unexpected("bad body".to_string()).is_retryable());
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::RateLimited {
            retry_after_secs: Some(20),
        };
        assert_eq!(err.to_string(), "Rate limited by API (retry after 20s)");

        let err = GenerationError::Api {
            status: Some(503),
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 503): overloaded");

        let err = GenerationError::Api {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "API error: connection refused");
    }

    #[test]
    fn test_git_error_display() {
        let err = GitError::Commit {
            output: "nothing to commit".to_string(),
        };
        assert_eq!(err.to_string(), "git commit failed: nothing to commit");
    }
}
