//! Commit creation.

use tracing::{error, info};

use crate::error::GitError;
use crate::message::CommitMessage;

use super::VersionControl;

/// Commit the index with `message`. Failures are logged and not retried.
pub async fn apply<V: VersionControl + ?Sized>(
    vcs: &V,
    message: &CommitMessage,
) -> Result<(), GitError> {
    match vcs.commit(message.as_str()).await {
        Ok(()) => {
            info!("Commit created successfully");
            Ok(())
        }
        Err(e) => {
            error!("Error creating commit: {e}");
            Err(e)
        }
    }
}
