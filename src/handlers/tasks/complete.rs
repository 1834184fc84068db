use axum::{extract::Path, Extension};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::Task;
use crate::error::ApiError;
use crate::middleware::{require_owner, ApiResponse, ApiResult, AuthUser};
use crate::services::TaskService;

/// PATCH /api/:user_id/tasks/:task_id/complete - flip the completed flag
pub async fn task_complete(
    Extension(auth_user): Extension<AuthUser>,
    Path((user_id, task_id)): Path<(String, Uuid)>,
) -> ApiResult<Task> {
    let owner_id = require_owner(&auth_user, &user_id)?;

    let pool = DatabaseManager::pool().await?;
    let task = TaskService::new(pool)
        .toggle_completion(&owner_id, task_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    tracing::info!(task_id = %task.id, user_id = %owner_id, completed = task.completed, "task completion toggled");
    Ok(ApiResponse::success(task))
}
