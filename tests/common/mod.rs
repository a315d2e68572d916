#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/recipeshare-api");
        cmd.env("RECIPESHARE_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env (loaded by the server)
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
            match client.get(&url).send().await {
                Ok(resp) => {
                    // Consider server ready on any non-404 response
                    if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Integration tests need a live Postgres. When DATABASE_URL is absent the
/// suites no-op so `cargo test` still passes in a DB-less environment.
pub fn db_configured() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").is_ok()
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Register a fresh author and log in, returning (username, bearer token).
pub async fn signup(server: &TestServer) -> Result<(String, String)> {
    let username = unique("author");
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/authors", server.base_url))
        .json(&json!({
            "username": username,
            "password": "secret123",
            "first_name": "Test",
            "last_name": "Author"
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

    let token = login(server, &username, "secret123").await?;
    Ok((username, token))
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<Value>().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("login response missing token")?
        .to_string();
    Ok(token)
}

pub fn recipe_payload(title: &str, is_private: bool) -> Value {
    json!({
        "title": title,
        "description": "A test recipe",
        "difficulty": "Easy",
        "is_private": is_private,
        "preparation_time_minutes": 30,
        "servings": "4 portions",
        "ingredients": [
            { "display_order": 1, "value": "2 eggs" },
            { "display_order": 2, "value": "1 cup flour" }
        ],
        "steps": [
            { "display_order": 1, "value": "Mix everything" },
            { "display_order": 2, "value": "Bake for 30 minutes" }
        ]
    })
}

/// Create a recipe and return its response body's `data` object.
pub async fn create_recipe(server: &TestServer, token: &str, payload: &Value) -> Result<Value> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/recipes", server.base_url))
        .bearer_auth(token)
        .json(payload)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "recipe create failed: {}", res.status());
    let body = res.json::<Value>().await?;
    Ok(body["data"].clone())
}

/// Create a cookbook and return its response body's `data` object.
pub async fn create_cookbook(server: &TestServer, token: &str, payload: &Value) -> Result<Value> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/cookbooks", server.base_url))
        .bearer_auth(token)
        .json(payload)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "cookbook create failed: {}", res.status());
    let body = res.json::<Value>().await?;
    Ok(body["data"].clone())
}
