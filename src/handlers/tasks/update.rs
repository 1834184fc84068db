use axum::{extract::Path, Extension, Json};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Task, TaskUpdate};
use crate::error::ApiError;
use crate::middleware::{require_owner, ApiResponse, ApiResult, AuthUser};
use crate::services::TaskService;

/// PUT /api/:user_id/tasks/:task_id - partial update; absent fields keep
/// their prior values
pub async fn task_update(
    Extension(auth_user): Extension<AuthUser>,
    Path((user_id, task_id)): Path<(String, Uuid)>,
    Json(body): Json<TaskUpdate>,
) -> ApiResult<Task> {
    let owner_id = require_owner(&auth_user, &user_id)?;
    body.validate()?;

    let pool = DatabaseManager::pool().await?;
    let task = TaskService::new(pool)
        .update(&owner_id, task_id, body)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    tracing::info!(task_id = %task.id, user_id = %owner_id, "task updated");
    Ok(ApiResponse::success(task))
}
