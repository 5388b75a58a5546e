mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_banner_lists_endpoints() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["success"], true);
    assert!(body["data"]["endpoints"]["schemes"].is_string());
    Ok(())
}
