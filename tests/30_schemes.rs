mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn marker() -> String {
    format!("TestMinistry{}", std::process::id())
}

#[tokio::test]
async fn scheme_lifecycle_end_to_end() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let token = common::superadmin_token(server).await?;

    // Create
    let res = client
        .post(format!("{}/api/schemes", server.base_url))
        .bearer_auth(&token)
        .json(&common::scheme_payload("Lifecycle Test Scheme", &marker()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["isActive"], true);
    assert_eq!(body["data"]["viewCount"], 0);
    assert_eq!(body["data"]["state"], "All India");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Each public fetch increments the view counter
    let first: Value = client
        .get(format!("{}/api/schemes/{}", server.base_url, id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(first["data"]["viewCount"], 1);

    let second: Value = client
        .get(format!("{}/api/schemes/{}", server.base_url, id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(second["data"]["viewCount"], 2);

    // Toggle off: the public listing no longer includes it
    let res = client
        .patch(format!("{}/api/schemes/{}/toggle", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let toggled: Value = res.json().await?;
    assert_eq!(toggled["data"]["isActive"], false);

    let listing: Value = client
        .get(format!(
            "{}/api/schemes?ministry={}",
            server.base_url,
            marker()
        ))
        .send()
        .await?
        .json()
        .await?;
    let names: Vec<&str> = listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"Lifecycle Test Scheme"));

    // The admin listing still sees it under status=inactive
    let admin_listing: Value = client
        .get(format!(
            "{}/api/schemes/admin/all?status=inactive&search=Lifecycle Test",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert!(admin_listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["id"] == json!(id)));

    // Toggle back on restores the original value
    let res = client
        .patch(format!("{}/api/schemes/{}/toggle", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    let toggled: Value = res.json().await?;
    assert_eq!(toggled["data"]["isActive"], true);

    // Update runs full validation
    let res = client
        .put(format!("{}/api/schemes/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Renamed Only" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut full = common::scheme_payload("Lifecycle Renamed", &marker());
    full["category"] = json!("Loan");
    let res = client
        .put(format!("{}/api/schemes/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&full)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["data"]["name"], "Lifecycle Renamed");
    assert_eq!(updated["data"]["category"], "Loan");

    // Delete is permanent
    let res = client
        .delete(format!("{}/api/schemes/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/schemes/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn invalid_payloads_rejected_and_not_persisted() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let token = common::superadmin_token(server).await?;
    let tag = format!("NeverPersisted{}", std::process::id());

    // Missing required field
    let mut payload = common::scheme_payload(&tag, &tag);
    payload.as_object_mut().unwrap().remove("benefits");
    let res = client
        .post(format!("{}/api/schemes", server.base_url))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["error"]["benefits"].is_string());

    // Enum violations
    for (field, value) in [("category", "Blockchain"), ("state", "Narnia")] {
        let mut payload = common::scheme_payload(&tag, &tag);
        payload[field] = json!(value);
        let res = client
            .post(format!("{}/api/schemes", server.base_url))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing was persisted
    let listing: Value = client
        .get(format!("{}/api/schemes/admin/all?search={}", server.base_url, tag))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(listing["pagination"]["totalSchemes"], 0);
    Ok(())
}

#[tokio::test]
async fn scheme_writes_require_authentication() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/schemes", server.base_url))
        .json(&common::scheme_payload("No Auth Scheme", "Nobody"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/schemes/admin/all", server.base_url))
        .bearer_auth("not-a-real-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn categories_and_stats_report_active_schemes() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let token = common::superadmin_token(server).await?;

    let res = client
        .post(format!("{}/api/schemes", server.base_url))
        .bearer_auth(&token)
        .json(&common::scheme_payload("Stats Probe Scheme", &marker()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let categories: Value = client
        .get(format!("{}/api/schemes/categories", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(categories["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["name"] == "Subsidy" && c["count"].as_i64().unwrap() >= 1));

    let stats: Value = client
        .get(format!("{}/api/schemes/stats", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(stats["data"]["totalSchemes"].as_i64().unwrap() >= 1);
    assert!(stats["data"]["mostViewed"].as_array().unwrap().len() <= 5);
    assert!(stats["data"]["recentlyAdded"].as_array().unwrap().len() <= 5);
    Ok(())
}
