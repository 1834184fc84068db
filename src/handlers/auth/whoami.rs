use axum::Extension;

use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;

/// GET /auth/me - return the authenticated user's account record
pub async fn whoami(Extension(auth_user): Extension<AuthUser>) -> ApiResult<User> {
    let pool = DatabaseManager::pool().await?;
    let user = UserService::new(pool)
        .find_by_id(&auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(user))
}
