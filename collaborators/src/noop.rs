use async_trait::async_trait;
use linker_core::CollaboratorError;
use tracing::info;

use crate::traits::{EditBot, EditTuple};

/// Logs would-be edits instead of uploading them. The idempotent-upload
/// contract (§6) is trivially satisfied since nothing is persisted.
pub struct LoggingEditBot;

#[async_trait]
impl EditBot for LoggingEditBot {
    async fn upload(&self, edits: &[EditTuple]) -> Result<(), CollaboratorError> {
        for edit in edits {
            info!(
                subject = %edit.subject,
                predicate = %edit.predicate,
                value = %edit.value,
                reference_id = %edit.reference_id,
                "would upload edit"
            );
        }
        Ok(())
    }
}
