use axum::Json;

use super::{LoginRequest, TokenResponse};
use crate::auth;
use crate::auth::password;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;

/// POST /auth/login - verify credentials and issue a bearer token.
/// Unknown email and wrong password fail with the same message so the
/// response does not reveal which accounts exist.
pub async fn login(Json(body): Json<LoginRequest>) -> ApiResult<TokenResponse> {
    let pool = DatabaseManager::pool().await?;
    let user = UserService::new(pool).find_by_email(&body.email).await?;

    let user = match user {
        Some(user) if password::verify_password(&body.password, &user.password_hash) => user,
        _ => {
            tracing::warn!(email = %body.email, "login rejected");
            return Err(ApiError::unauthorized("Incorrect email or password"));
        }
    };

    let ttl = auth::default_ttl();
    let access_token = auth::issue_token(&user.id, ttl)?;

    tracing::info!(user_id = %user.id, "login succeeded");
    Ok(ApiResponse::success(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: ttl.num_seconds(),
    }))
}
