use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;

/// Authenticated user context extracted from the verified JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
}

/// JWT authentication middleware: requires a well-formed bearer token,
/// verifies it, and injects the token's subject into the request.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let user_id = auth::verify_token(&token)?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Ownership gate: the identity embedded in the token must match the identity
/// named in the request path. Returns the verified id, which callers use as
/// the scoping key for every store operation.
pub fn require_owner(auth_user: &AuthUser, path_user_id: &str) -> Result<String, ApiError> {
    if auth_user.user_id != path_user_id {
        tracing::warn!(
            token_user = %auth_user.user_id,
            path_user = %path_user_id,
            "ownership check failed"
        );
        return Err(ApiError::forbidden("You may only access your own tasks"));
    }

    Ok(auth_user.user_id.clone())
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with_auth("Bearer ");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn owner_match_returns_scoping_key() {
        let auth_user = AuthUser { user_id: "u1".to_string() };
        assert_eq!(require_owner(&auth_user, "u1").unwrap(), "u1");
    }

    #[test]
    fn owner_mismatch_is_forbidden() {
        let auth_user = AuthUser { user_id: "u1".to_string() };
        let err = require_owner(&auth_user, "u2").unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
