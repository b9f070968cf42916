use anyhow::Result;
use chrono::{Local, NaiveDate};
use dialoguer::{Input, Select};
use owo_colors::{OwoColorize, Style};
use tasker_core::repository::Store;
use tasker_core::tasker::Tasker;

use crate::cli::CreateCommand;
use crate::parser::parse_date;
use crate::views::table::cadence_label;

/// Creates a task from the given flags, prompting for whatever is missing.
///
/// Flag values are validated once and fail the command. Prompted values are
/// re-asked until they pass the same checks the core applies on insert.
pub async fn create_task<S: Store>(tasker: &Tasker<S>, command: CreateCommand) -> Result<()> {
    let name = match command.name {
        Some(name) => name,
        None => prompt_name(tasker).await?,
    };

    let cadence = match command.cadence {
        Some(cadence) => cadence,
        None => prompt_cadence(tasker)?,
    };

    let start = match command.start {
        Some(start) => parse_date(&start, Local::now())?,
        None => prompt_start(tasker, &cadence)?,
    };

    let task = tasker.create_task(&name, &cadence, start).await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.name.bright_white().bold()
    );
    println!(
        "  {} {} starting {}",
        "→".blue(),
        cadence_label(&task.cadence),
        task.start_date.yellow()
    );
    Ok(())
}

fn report(message: impl std::fmt::Display) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

async fn prompt_name<S: Store>(tasker: &Tasker<S>) -> Result<String> {
    loop {
        let name: String = Input::new()
            .with_prompt("Task name")
            .allow_empty(true)
            .interact_text()?;
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        match tasker.assert_name_unique(name).await {
            Ok(()) => return Ok(name.to_string()),
            Err(e) if e.is_validation() => report(e),
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_cadence<S: Store>(tasker: &Tasker<S>) -> Result<String> {
    let ids: Vec<String> = tasker
        .registry()
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    let labels: Vec<String> = ids.iter().map(|id| cadence_label(id)).collect();

    let selection = Select::new()
        .with_prompt("Cadence")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(ids[selection].clone())
}

fn prompt_start<S: Store>(tasker: &Tasker<S>, cadence: &str) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new()
            .with_prompt("When does this start (YYYY-MM-DD, default today)")
            .allow_empty(true)
            .interact_text()?;
        let start = match parse_date(&input, Local::now()) {
            Ok(start) => start,
            Err(e) => {
                report(e);
                continue;
            }
        };
        match tasker.assert_start_date_valid(cadence, start) {
            Ok(()) => return Ok(start),
            Err(e) if e.is_validation() => report(e),
            Err(e) => return Err(e.into()),
        }
    }
}
