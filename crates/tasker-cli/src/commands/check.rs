use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use tasker_core::repository::Store;
use tasker_core::tasker::{today, Tasker};

use crate::cli::CheckCommand;
use crate::parser::parse_date;
use crate::views::table::display_instances;

/// Runs a scheduling pass and prints every unfinished instance.
///
/// Prints nothing at all when there is nothing to do.
pub async fn check_tasks<S: Store>(tasker: &Tasker<S>, command: CheckCommand) -> Result<()> {
    let until = command
        .until
        .as_deref()
        .map(|d| parse_date(d, Local::now()))
        .transpose()?;

    tasker.schedule(until).await?;
    let instances = tasker.get_incomplete_task_instances().await?;
    if instances.is_empty() {
        return Ok(());
    }

    println!("{}", "Things to do:".bold());
    display_instances(&instances, today());
    println!();
    println!("To complete any task, use:");
    println!("    {}", "tasker complete N".bright_black());
    Ok(())
}
