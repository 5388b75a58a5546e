use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Spawns the built server binary once per test binary and reuses it. Tests
/// require a reachable Postgres; without DATABASE_URL they skip.
pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_agrischemes-api"));
        cmd.env("PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL / JWT_SECRET
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
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
                if resp.status() == StatusCode::OK {
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

/// Returns the shared test server, or None when DATABASE_URL is not set
/// (the caller should skip).
pub async fn server() -> Result<Option<&'static TestServer>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}

pub const ROOT_EMAIL: &str = "it-admin@agrischemes.test";
pub const ROOT_PASSWORD: &str = "integration-pass";

/// Obtain a superadmin token: run setup if the store is empty, otherwise
/// log in with the well-known integration credentials.
pub async fn superadmin_token(server: &TestServer) -> Result<String> {
    let client = reqwest::Client::new();

    let setup = client
        .post(format!("{}/api/admin/setup", server.base_url))
        .json(&json!({
            "username": "it-admin",
            "email": ROOT_EMAIL,
            "password": ROOT_PASSWORD,
        }))
        .send()
        .await?;

    if setup.status() == StatusCode::CREATED {
        let body: Value = setup.json().await?;
        return Ok(body["data"]["token"].as_str().unwrap().to_string());
    }

    let login: Value = client
        .post(format!("{}/api/admin/login", server.base_url))
        .json(&json!({ "email": ROOT_EMAIL, "password": ROOT_PASSWORD }))
        .send()
        .await?
        .json()
        .await?;
    login["data"]["token"]
        .as_str()
        .map(|t| t.to_string())
        .context("superadmin login failed; is the test database seeded by another suite?")
}

/// A valid scheme payload, parameterized so each run can tag its records.
pub fn scheme_payload(name: &str, ministry: &str) -> Value {
    json!({
        "name": name,
        "shortDescription": "Integration test scheme",
        "description": "A scheme created by the integration test suite",
        "officialLink": "https://x.gov.in",
        "category": "Subsidy",
        "ministry": ministry,
        "eligibility": "All farmers",
        "benefits": "Financial support",
    })
}
