pub mod auth;
pub mod rate_limit;
pub mod response;
pub mod security_headers;

pub use auth::{jwt_auth_middleware, require_owner, AuthUser};
pub use rate_limit::{build_rate_limiter, rate_limit_middleware, SharedRateLimiter};
pub use response::{ApiResponse, ApiResult};
pub use security_headers::security_headers_middleware;
