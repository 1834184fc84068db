use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Secret the spawned server and the tests share for signing tokens
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/todo-api-rust");
        cmd.env("TODO_API_PORT", port.to_string())
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit the rest of the environment so the server can see
        // DATABASE_URL from .env when one is configured
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready on any non-404 response; 503 means up but no database
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Sign a token for `subject` with the shared test secret
pub fn token_for(subject: &str) -> String {
    let claims = todo_api_rust::auth::Claims::new(subject.to_string(), chrono::Duration::minutes(30));
    todo_api_rust::auth::sign_claims(&claims, TEST_JWT_SECRET, "HS256").expect("sign test token")
}

/// Sign a token for `subject` that expired in the past
pub fn expired_token_for(subject: &str) -> String {
    let now = chrono::Utc::now();
    let claims = todo_api_rust::auth::Claims {
        user_id: None,
        sub: Some(subject.to_string()),
        exp: (now - chrono::Duration::minutes(5)).timestamp(),
        iat: (now - chrono::Duration::minutes(35)).timestamp(),
    };
    todo_api_rust::auth::sign_claims(&claims, TEST_JWT_SECRET, "HS256").expect("sign test token")
}
