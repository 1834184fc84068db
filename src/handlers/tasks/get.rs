use axum::{extract::Path, Extension};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::Task;
use crate::error::ApiError;
use crate::middleware::{require_owner, ApiResponse, ApiResult, AuthUser};
use crate::services::TaskService;

/// GET /api/:user_id/tasks/:task_id - fetch one task. An id owned by someone
/// else is reported exactly like an id that does not exist.
pub async fn task_get(
    Extension(auth_user): Extension<AuthUser>,
    Path((user_id, task_id)): Path<(String, Uuid)>,
) -> ApiResult<Task> {
    let owner_id = require_owner(&auth_user, &user_id)?;

    let pool = DatabaseManager::pool().await?;
    let task = TaskService::new(pool)
        .get(&owner_id, task_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(ApiResponse::success(task))
}
