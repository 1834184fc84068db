use axum::{extract::Path, Extension};
use serde::Serialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{require_owner, ApiResponse, ApiResult, AuthUser};
use crate::services::TaskService;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// DELETE /api/:user_id/tasks/:task_id - hard delete, no tombstone
pub async fn task_delete(
    Extension(auth_user): Extension<AuthUser>,
    Path((user_id, task_id)): Path<(String, Uuid)>,
) -> ApiResult<DeleteResponse> {
    let owner_id = require_owner(&auth_user, &user_id)?;

    let pool = DatabaseManager::pool().await?;
    let deleted = TaskService::new(pool).delete(&owner_id, task_id).await?;

    if !deleted {
        return Err(ApiError::not_found("Task not found"));
    }

    tracing::info!(%task_id, user_id = %owner_id, "task deleted");
    Ok(ApiResponse::success(DeleteResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
