use axum::Json;
use std::collections::HashMap;

use super::SignupRequest;
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;

/// POST /auth/signup - create a new account
pub async fn signup(Json(body): Json<SignupRequest>) -> ApiResult<User> {
    validate(&body)?;

    let pool = DatabaseManager::pool().await?;
    let user = UserService::new(pool)
        .create(&body.email, body.name.as_deref(), &body.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(ApiResponse::success(user))
}

fn validate(body: &SignupRequest) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if body.email.trim().is_empty() || !body.email.contains('@') {
        field_errors.insert("email".to_string(), "A valid email is required".to_string());
    }
    if body.password.is_empty() {
        field_errors.insert("password".to_string(), "Password is required".to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid signup data", Some(field_errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_email() {
        let body = SignupRequest {
            email: "".to_string(),
            password: "secret".to_string(),
            name: None,
        };
        assert!(validate(&body).is_err());
    }

    #[test]
    fn rejects_empty_password() {
        let body = SignupRequest {
            email: "user@example.com".to_string(),
            password: "".to_string(),
            name: None,
        };
        assert!(validate(&body).is_err());
    }

    #[test]
    fn accepts_valid_signup() {
        let body = SignupRequest {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
            name: Some("User".to_string()),
        };
        assert!(validate(&body).is_ok());
    }
}
