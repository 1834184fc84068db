use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Task, TaskCreate, TaskUpdate};

/// Task Store. Every query is filtered by `user_id`, so a task is visible and
/// mutable only through its owner: an id that exists under a different owner
/// is indistinguishable from an id that does not exist at all.
pub struct TaskService {
    pool: PgPool,
}

impl TaskService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: &str, input: TaskCreate) -> Result<Task, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, user_id, title, description, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, now(), now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn get(&self, owner_id: &str, task_id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// List the owner's tasks in stable creation order.
    pub async fn list(&self, owner_id: &str, skip: i64, limit: i64) -> Result<Vec<Task>, DatabaseError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Apply supplied fields over the current row; absent fields keep their
    /// prior values. Refreshes `updated_at` on every successful call.
    /// Last write wins for concurrent updates.
    pub async fn update(
        &self,
        owner_id: &str,
        task_id: Uuid,
        changes: TaskUpdate,
    ) -> Result<Option<Task>, DatabaseError> {
        let Some(existing) = self.get(owner_id, task_id).await? else {
            return Ok(None);
        };

        let title = changes.title.unwrap_or(existing.title);
        let description = changes.description.or(existing.description);
        let completed = changes.completed.unwrap_or(existing.completed);

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, completed = $5, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Returns true iff a row matching both id and owner existed and was removed.
    pub async fn delete(&self, owner_id: &str, task_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn toggle_completion(
        &self,
        owner_id: &str,
        task_id: Uuid,
    ) -> Result<Option<Task>, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = NOT completed, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }
}
