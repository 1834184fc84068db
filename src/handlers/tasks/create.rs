use axum::{extract::Path, Extension, Json};

use crate::database::manager::DatabaseManager;
use crate::database::models::{Task, TaskCreate};
use crate::middleware::{require_owner, ApiResponse, ApiResult, AuthUser};
use crate::services::TaskService;

/// POST /api/:user_id/tasks - create a task owned by the authenticated user
pub async fn task_create(
    Extension(auth_user): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(body): Json<TaskCreate>,
) -> ApiResult<Task> {
    let owner_id = require_owner(&auth_user, &user_id)?;
    body.validate()?;

    let pool = DatabaseManager::pool().await?;
    let task = TaskService::new(pool).create(&owner_id, body).await?;

    tracing::info!(task_id = %task.id, user_id = %owner_id, "task created");
    Ok(ApiResponse::success(task))
}
