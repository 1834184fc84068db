use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use todo_api_rust::config::{self, SecurityConfig};
use todo_api_rust::database::manager::DatabaseManager;
use todo_api_rust::handlers;
use todo_api_rust::middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Todo API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("TODO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Todo API listening on http://{}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
    .expect("server");

    DatabaseManager::close().await;
}

fn app() -> Router {
    let config = config::config();
    let limiter = middleware::build_rate_limiter(config.api.rate_limit_requests_per_minute);

    // Routes that require a verified bearer token
    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::whoami))
        .merge(task_routes())
        .layer(axum_middleware::from_fn(middleware::jwt_auth_middleware));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .merge(protected)
        // Global middleware; rate limiting runs before the auth guard
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.security))
                .layer(axum_middleware::from_fn_with_state(
                    limiter,
                    middleware::rate_limit_middleware,
                ))
                .layer(axum_middleware::from_fn(
                    middleware::security_headers_middleware,
                )),
        )
}

fn task_routes() -> Router {
    use handlers::tasks;

    Router::new()
        .route(
            "/api/:user_id/tasks",
            post(tasks::task_create).get(tasks::task_list),
        )
        .route(
            "/api/:user_id/tasks/:task_id",
            get(tasks::task_get)
                .put(tasks::task_update)
                .delete(tasks::task_delete),
        )
        .route(
            "/api/:user_id/tasks/:task_id/complete",
            patch(tasks::task_complete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Todo API (Rust)",
            "version": version,
            "description": "Per-user task management backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "signup": "POST /auth/signup (public)",
                "login": "POST /auth/login (public - token acquisition)",
                "me": "GET /auth/me (protected)",
                "tasks": "/api/:user_id/tasks[/:task_id[/complete]] (protected, owner only)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
