use axum::{
    extract::{Path, Query},
    Extension,
};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::Task;
use crate::error::ApiError;
use crate::middleware::{require_owner, ApiResponse, ApiResult, AuthUser};
use crate::services::TaskService;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    fn validate(&self) -> Result<(i64, i64), ApiError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if skip < 0 {
            return Err(ApiError::bad_request("Skip parameter must be non-negative"));
        }
        if limit <= 0 || limit > MAX_LIMIT {
            return Err(ApiError::bad_request(format!(
                "Limit parameter must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok((skip, limit))
    }
}

/// GET /api/:user_id/tasks - list the authenticated user's tasks
pub async fn task_list(
    Extension(auth_user): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Task>> {
    let owner_id = require_owner(&auth_user, &user_id)?;
    let (skip, limit) = query.validate()?;

    let pool = DatabaseManager::pool().await?;
    let tasks = TaskService::new(pool).list(&owner_id, skip, limit).await?;

    tracing::debug!(count = tasks.len(), user_id = %owner_id, "tasks listed");
    Ok(ApiResponse::success(tasks))
}
