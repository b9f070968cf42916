use anyhow::Result;
use owo_colors::OwoColorize;
use tasker_core::repository::Store;
use tasker_core::tasker::Tasker;

use crate::cli::CompleteCommand;

pub async fn complete_instance<S: Store>(tasker: &Tasker<S>, command: CompleteCommand) -> Result<()> {
    if tasker.complete_task_instance(command.id).await? {
        println!("{} Completed task instance {}", "✓".green().bold(), command.id);
    } else {
        // Completing an unknown instance is not an error.
        println!("No task instance with ID {}.", command.id.yellow());
    }
    Ok(())
}
