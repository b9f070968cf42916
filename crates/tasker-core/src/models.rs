use chrono::NaiveDate;
use sqlx::FromRow;

/// A named recurring obligation. Tasks are never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: i64,
    pub name: String,
    /// Identifier resolved through the cadence registry.
    pub cadence: String,
    pub start_date: NaiveDate,
}

/// One concrete, datable occurrence of a task.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TaskInstance {
    pub id: i64,
    pub task_id: i64,
    pub date: NaiveDate,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub cadence: String,
    pub start_date: NaiveDate,
}

/// A task joined with its most recently dated instance, if any.
///
/// `latest_date` and `latest_done` are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SchedulableTask {
    pub task_id: i64,
    pub name: String,
    pub cadence: String,
    pub start_date: NaiveDate,
    pub latest_date: Option<NaiveDate>,
    pub latest_done: Option<bool>,
}

impl SchedulableTask {
    /// The latest instance as `(date, done)`.
    pub fn latest(&self) -> Option<(NaiveDate, bool)> {
        self.latest_date
            .map(|date| (date, self.latest_done.unwrap_or(false)))
    }
}

/// An open instance as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct IncompleteInstance {
    pub id: i64,
    pub task_name: String,
    pub date: NaiveDate,
}

/// An instance the scheduler decided to create during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInstance {
    pub task_id: i64,
    pub task_name: String,
    pub date: NaiveDate,
}

/// Outcome of one scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub until: NaiveDate,
    pub tasks_examined: usize,
    pub created: Vec<TaskInstance>,
}

impl ScheduleSummary {
    pub fn instances_created(&self) -> usize {
        self.created.len()
    }
}
