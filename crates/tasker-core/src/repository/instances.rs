use crate::error::CoreError;
use crate::models::{IncompleteInstance, PlannedInstance, TaskInstance};
use crate::repository::SqliteRepository;
use async_trait::async_trait;

#[async_trait]
impl super::InstanceRepository for SqliteRepository {
    async fn insert_instances(
        &self,
        planned: &[PlannedInstance],
    ) -> Result<Vec<TaskInstance>, CoreError> {
        if planned.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool().begin().await?;
        let mut created = Vec::with_capacity(planned.len());

        for instance in planned {
            let row: TaskInstance = sqlx::query_as(
                r#"INSERT INTO task_instances (task_id, date, done)
                VALUES ($1, $2, 0)
                RETURNING id, task_id, date, done
                "#,
            )
            .bind(instance.task_id)
            .bind(instance.date)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn update_instance_done(&self, id: i64) -> Result<bool, CoreError> {
        let result = sqlx::query("UPDATE task_instances SET done = 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn select_incomplete_instances(&self) -> Result<Vec<IncompleteInstance>, CoreError> {
        let rows = sqlx::query_as(
            r#"SELECT ti.id AS id, t.name AS task_name, ti.date AS date
            FROM task_instances ti
            JOIN tasks t ON t.id = ti.task_id
            WHERE ti.done = 0
            ORDER BY ti.date, ti.id"#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn list_instances(&self) -> Result<Vec<TaskInstance>, CoreError> {
        let rows = sqlx::query_as(
            "SELECT id, task_id, date, done FROM task_instances ORDER BY date, task_id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }
}
