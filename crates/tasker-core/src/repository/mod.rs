use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    IncompleteInstance, NewTask, PlannedInstance, SchedulableTask, Task, TaskInstance,
};
use async_trait::async_trait;

pub mod instances;
pub mod tasks;

/// Persistence operations on task definitions.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn count_tasks_with_name(&self, name: &str) -> Result<i64, CoreError>;
    async fn insert_task(&self, data: NewTask) -> Result<Task, CoreError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError>;
    /// One row per task, joined with its latest instance. This is the
    /// snapshot a scheduling pass plans from.
    async fn select_schedulable(&self) -> Result<Vec<SchedulableTask>, CoreError>;
}

/// Persistence operations on task instances.
#[async_trait]
pub trait InstanceRepository: Send + Sync {
    /// Inserts all planned instances as one batch, returning them in the
    /// order given.
    async fn insert_instances(
        &self,
        planned: &[PlannedInstance],
    ) -> Result<Vec<TaskInstance>, CoreError>;
    /// Marks an instance done. Returns `false` when no such instance exists.
    async fn update_instance_done(&self, id: i64) -> Result<bool, CoreError>;
    /// Open instances, earliest first.
    async fn select_incomplete_instances(&self) -> Result<Vec<IncompleteInstance>, CoreError>;
    async fn list_instances(&self) -> Result<Vec<TaskInstance>, CoreError>;
}

/// Everything the scheduler and the lifecycle operations need from storage.
pub trait Store: TaskRepository + InstanceRepository {}

impl<T: TaskRepository + InstanceRepository> Store for T {}

/// SQLite implementation of the repository pattern
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
