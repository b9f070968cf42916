use crate::error::CoreError;
use crate::models::{NewTask, SchedulableTask, Task};
use crate::repository::SqliteRepository;
use async_trait::async_trait;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn count_tasks_with_name(&self, name: &str) -> Result<i64, CoreError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE name = $1")
            .bind(name)
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }

    async fn insert_task(&self, data: NewTask) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task: Task = sqlx::query_as(
            r#"INSERT INTO tasks (name, cadence, start_date)
            VALUES ($1, $2, $3)
            RETURNING id, name, cadence, start_date
            "#,
        )
        .bind(&data.name)
        .bind(&data.cadence)
        .bind(data.start_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                CoreError::DuplicateName(data.name.clone())
            }
            other => CoreError::Database(other),
        })?;

        tx.commit().await?;
        Ok(task)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            "SELECT id, name, cadence, start_date FROM tasks ORDER BY start_date, id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn select_schedulable(&self) -> Result<Vec<SchedulableTask>, CoreError> {
        let rows = sqlx::query_as(
            r#"SELECT
                t.id AS task_id,
                t.name AS name,
                t.cadence AS cadence,
                t.start_date AS start_date,
                li.date AS latest_date,
                li.done AS latest_done
            FROM tasks t
            LEFT JOIN latest_task_instances li ON li.task_id = t.id
            ORDER BY t.id"#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }
}
