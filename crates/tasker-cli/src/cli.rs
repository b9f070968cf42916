use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pretty basic interval task management system
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Path to the database file, if the default is not desired
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Log verbosity (overrides TASKER_LOG_LEVEL)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a recurring task, prompting for anything not given
    Create(CreateCommand),
    /// Schedule due task instances and print the unfinished ones
    Check(CheckCommand),
    /// Mark a task instance as done
    Complete(CompleteCommand),
    /// List defined tasks
    Tasks,
    /// List the available cadences
    Cadences,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateCommand {
    /// The name of the task
    #[arg(short, long)]
    pub name: Option<String>,
    /// How often the task recurs (once, daily, weekly, monthly)
    #[arg(short, long)]
    pub cadence: Option<String>,
    /// The date of the first instance (YYYY-MM-DD or e.g. "next monday")
    #[arg(short, long)]
    pub start: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    /// Schedule instances due up to this date instead of today
    #[arg(long)]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompleteCommand {
    /// The ID of the task instance to complete
    pub id: i64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
