//! # Tasker Core Library
//!
//! Recurring task tracking: every task has a name, a cadence and a start
//! date, and scheduling passes materialize dated instances of it that can be
//! completed one by one.
//!
//! ## Core Modules
//!
//! - [`recurrence`]: Cadence rules and the registry resolving them by identifier
//! - [`scheduler`]: Idempotent, one-step-per-pass instance materialization
//! - [`tasker`]: Task lifecycle operations (create, schedule, complete, list)
//! - [`repository`]: Storage traits and their SQLite implementation
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures
//! - [`error`]: Error type shared by all of the above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use tasker_core::{db, repository::SqliteRepository, tasker::Tasker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tasker_core::error::CoreError> {
//!     let pool = db::establish_connection("tasks.sqlite").await?;
//!     let tasker = Tasker::with_builtins(SqliteRepository::new(pool));
//!
//!     let start = NaiveDate::from_ymd_opt(2016, 11, 3).unwrap();
//!     tasker.create_task("Make coffee", "daily", start).await?;
//!
//!     tasker.schedule(None).await?;
//!     for instance in tasker.get_incomplete_task_instances().await? {
//!         println!("{}. ({}) {}", instance.id, instance.date, instance.task_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod scheduler;
pub mod tasker;
