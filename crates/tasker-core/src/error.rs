use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Task \"{0}\" already exists.")]
    DuplicateName(String),

    #[error("Cadence {cadence} and start date: {start} could lose task instances.")]
    InvalidStartDate { cadence: String, start: NaiveDate },

    #[error("Cadence {0} not available.")]
    UnsupportedCadence(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// True for errors caused by what the caller asked for, as opposed to
    /// failures of the underlying storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::DuplicateName(_)
                | CoreError::InvalidStartDate { .. }
                | CoreError::UnsupportedCadence(_)
                | CoreError::InvalidInput(_)
        )
    }
}
