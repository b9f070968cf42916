use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::models::{IncompleteInstance, NewTask, ScheduleSummary, Task, TaskInstance};
use crate::recurrence::CadenceRegistry;
use crate::repository::Store;
use crate::scheduler::Scheduler;

/// The local calendar date, used when a pass is not given an explicit bound.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Task lifecycle operations over a store and a cadence registry.
pub struct Tasker<S> {
    store: S,
    scheduler: Scheduler,
}

impl<S: Store> Tasker<S> {
    pub fn new(store: S, registry: Arc<CadenceRegistry>) -> Self {
        Self {
            store,
            scheduler: Scheduler::new(registry),
        }
    }

    /// A tasker that knows the built-in cadences.
    pub fn with_builtins(store: S) -> Self {
        Self::new(store, Arc::new(CadenceRegistry::with_builtins()))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &CadenceRegistry {
        self.scheduler.registry()
    }

    /// Fails with [`CoreError::UnsupportedCadence`] unless `cadence` is registered.
    pub fn assert_cadence_valid(&self, cadence: &str) -> Result<(), CoreError> {
        self.registry().get(cadence).map(|_| ())
    }

    pub fn assert_start_date_valid(&self, cadence: &str, start: NaiveDate) -> Result<(), CoreError> {
        self.registry().validate(cadence, start)
    }

    /// Fails with [`CoreError::DuplicateName`] if a task called `name` exists.
    pub async fn assert_name_unique(&self, name: &str) -> Result<(), CoreError> {
        if self.store.count_tasks_with_name(name).await? > 0 {
            return Err(CoreError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Creates a task.
    ///
    /// Checks run cheapest first: cadence known, start date compatible, name
    /// non-empty, name unused. Nothing is persisted when a check fails.
    /// Surrounding whitespace is trimmed from the name before it is checked
    /// and stored.
    pub async fn create_task(
        &self,
        name: &str,
        cadence: &str,
        start_date: NaiveDate,
    ) -> Result<Task, CoreError> {
        let cadence = self.registry().canonical_id(cadence)?;
        self.assert_start_date_valid(&cadence, start_date)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidInput(
                "Task name cannot be empty".to_string(),
            ));
        }
        self.assert_name_unique(name).await?;

        let task = self
            .store
            .insert_task(NewTask {
                name: name.to_string(),
                cadence,
                start_date,
            })
            .await?;

        info!(task_id = task.id, name = %task.name, cadence = %task.cadence, start = %task.start_date, "created task");
        Ok(task)
    }

    /// Runs one scheduling pass, bounded by `until` or today.
    pub async fn schedule(&self, until: Option<NaiveDate>) -> Result<ScheduleSummary, CoreError> {
        let until = until.unwrap_or_else(today);
        self.scheduler.run(&self.store, until).await
    }

    /// Marks an instance done. Unknown ids are not an error; the return value
    /// tells whether anything was updated.
    pub async fn complete_task_instance(&self, instance_id: i64) -> Result<bool, CoreError> {
        let updated = self.store.update_instance_done(instance_id).await?;
        if updated {
            debug!(instance_id, "completed task instance");
        } else {
            warn!(instance_id, "no task instance with this id");
        }
        Ok(updated)
    }

    /// Open instances with their task names, earliest first.
    pub async fn get_incomplete_task_instances(&self) -> Result<Vec<IncompleteInstance>, CoreError> {
        self.store.select_incomplete_instances().await
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, CoreError> {
        self.store.list_tasks().await
    }

    /// Every instance, done or not, ordered by date then task id.
    pub async fn list_task_instances(&self) -> Result<Vec<TaskInstance>, CoreError> {
        self.store.list_instances().await
    }
}
