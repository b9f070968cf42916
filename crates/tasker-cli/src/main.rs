use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tasker_core::db;
use tasker_core::error::CoreError;
use tasker_core::repository::SqliteRepository;
use tasker_core::tasker::Tasker;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // A half-read configuration could point at the wrong database.
    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    logging::init_logging(cli.log_level, config.log_level.as_deref());

    let db_path = config.database_path(cli.database.as_deref());
    tracing::debug!("Using database {}", db_path.display());
    let db_pool = match db::establish_connection(&db_path.to_string_lossy()).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), anyhow::Error::from(e));
            std::process::exit(1);
        }
    };
    let tasker = Tasker::with_builtins(SqliteRepository::new(db_pool));

    let result = match cli.command {
        cli::Commands::Create(command) => commands::create::create_task(&tasker, command).await,
        cli::Commands::Check(command) => commands::check::check_tasks(&tasker, command).await,
        cli::Commands::Complete(command) => {
            commands::complete::complete_instance(&tasker, command).await
        }
        cli::Commands::Tasks => commands::tasks::list_tasks(&tasker).await,
        cli::Commands::Cadences => commands::cadences::list_cadences(&tasker),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::DuplicateName(name)) => {
            eprintln!(
                "{} Task \"{}\" already exists.",
                "Error:".style(error_style),
                name.yellow()
            );
        }
        Some(CoreError::UnsupportedCadence(cadence)) => {
            eprintln!(
                "{} Cadence {} not available.",
                "Error:".style(error_style),
                cadence.yellow()
            );
            eprintln!("Run `tasker cadences` to see the available ones.");
        }
        Some(core_error) if core_error.is_validation() => {
            eprintln!("{} {}", "Error:".style(error_style), core_error);
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
