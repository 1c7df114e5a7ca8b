//! Bounded exponential backoff retry for completion calls.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::{debug, error, warn};

use crate::error::GenerationError;

/// Configuration: 3 total attempts, delay after attempt `i` is `2^i` units.
pub const MAX_ATTEMPTS: u32 = 3;
const DEFAULT_UNIT_SECS: u64 = 1;

/// Attempt bound and backoff time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            unit: Duration::from_secs(DEFAULT_UNIT_SECS),
        }
    }
}

impl RetryPolicy {
    /// Deterministic doubling schedule: `unit`, `2 * unit`, `4 * unit`, ...
    pub fn backoff(&self) -> ExponentialBackoff {
        let ceiling = self
            .unit
            .saturating_mul(2u32.saturating_pow(self.max_attempts));
        ExponentialBackoff {
            current_interval: self.unit,
            initial_interval: self.unit,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: ceiling,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

/// Why the retry loop gave up.
#[derive(Debug)]
pub enum GenerationFailure {
    /// Every attempt hit a retryable error. `last_error` is `None` only for a zero-attempt policy.
    Exhausted {
        attempts: u32,
        last_error: Option<GenerationError>,
    },
    /// A non-retryable error on the 0-based `attempt` stopped the loop.
    Aborted {
        attempt: u32,
        error: GenerationError,
    },
}

impl GenerationFailure {
    /// Number of attempts that were actually made.
    pub fn attempts_made(&self) -> u32 {
        match self {
            GenerationFailure::Exhausted { attempts, .. } => *attempts,
            GenerationFailure::Aborted { attempt, .. } => attempt + 1,
        }
    }
}

/// Run `attempt` until it succeeds, fails non-retryably, or the policy is exhausted.
///
/// `attempt` receives the 0-based attempt index. Retryable failures are logged
/// as warnings and followed by a backoff sleep when another attempt remains;
/// anything else is logged as an error and ends the loop immediately.
pub async fn retry_generation<T, F, Fut>(
    policy: &RetryPolicy,
    model: &str,
    mut attempt: F,
) -> Result<T, GenerationFailure>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let mut backoff = policy.backoff();
    let mut last_error = None;

    for index in 0..policy.max_attempts {
        match attempt(index).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() => {
                warn!(
                    "Attempt {}/{} to generate commit message with {} failed: {}",
                    index + 1,
                    policy.max_attempts,
                    model,
                    e
                );

                if index + 1 < policy.max_attempts
                    && let Some(wait_duration) = backoff.next_backoff()
                {
                    debug!("Retrying in {:?}", wait_duration);
                    tokio::time::sleep(wait_duration).await;
                }

                last_error = Some(e);
            }
            Err(e) => {
                error!(
                    "Unexpected error generating commit message with {} on attempt {}: {}",
                    model,
                    index + 1,
                    e
                );
                return Err(GenerationFailure::Aborted {
                    attempt: index,
                    error: e,
                });
            }
        }
    }

    Err(GenerationFailure::Exhausted {
        attempts: policy.max_attempts,
        last_error,
    })
}
