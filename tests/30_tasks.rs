mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// End-to-end CRUD coverage. These tests need Postgres, so they skip when
// DATABASE_URL is unset (the guard tests in 20_guard.rs run regardless).

fn database_configured() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").is_ok()
}

/// A fresh owner id per test so runs do not interfere
fn fresh_user(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

#[tokio::test]
async fn create_then_get_round_trip() -> Result<()> {
    if !database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let user = fresh_user("roundtrip");
    let token = common::token_for(&user);

    let res = client
        .post(format!("{}/api/{}/tasks", server.base_url, user))
        .bearer_auth(&token)
        .json(&json!({"title": "Buy milk", "description": "2 liters"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["success"], true);
    let task = &created["data"];
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["description"], "2 liters");
    assert_eq!(task["completed"], false);
    assert_eq!(task["created_at"], task["updated_at"]);

    let task_id = task["id"].as_str().unwrap().to_string();
    let res = client
        .get(format!("{}/api/{}/tasks/{}", server.base_url, user, task_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["data"]["title"], "Buy milk");
    assert_eq!(fetched["data"]["description"], "2 liters");
    assert_eq!(fetched["data"]["completed"], false);
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_other_fields() -> Result<()> {
    if !database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let user = fresh_user("partial");
    let token = common::token_for(&user);

    let created = client
        .post(format!("{}/api/{}/tasks", server.base_url, user))
        .bearer_auth(&token)
        .json(&json!({"title": "Write report", "description": "quarterly"}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let task_id = created["data"]["id"].as_str().unwrap().to_string();
    let created_updated_at = created["data"]["updated_at"].as_str().unwrap().to_string();

    // Only completed is supplied; title/description must survive
    let res = client
        .put(format!("{}/api/{}/tasks/{}", server.base_url, user, task_id))
        .bearer_auth(&token)
        .json(&json!({"completed": true}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["data"]["title"], "Write report");
    assert_eq!(updated["data"]["description"], "quarterly");
    assert_eq!(updated["data"]["completed"], true);
    assert!(
        updated["data"]["updated_at"].as_str().unwrap() >= created_updated_at.as_str(),
        "updated_at went backwards"
    );
    Ok(())
}

#[tokio::test]
async fn list_is_paginated_and_owner_scoped() -> Result<()> {
    if !database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = fresh_user("pager");
    let other = fresh_user("stranger");
    let token = common::token_for(&owner);

    for i in 0..3 {
        let res = client
            .post(format!("{}/api/{}/tasks", server.base_url, owner))
            .bearer_auth(&token)
            .json(&json!({"title": format!("task {}", i)}))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(format!(
            "{}/api/{}/tasks?skip=0&limit=2",
            server.base_url, owner
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let page = res.json::<serde_json::Value>().await?;
    assert_eq!(page["data"].as_array().unwrap().len(), 2);

    // A different owner sees none of them
    let res = client
        .get(format!("{}/api/{}/tasks", server.base_url, other))
        .bearer_auth(common::token_for(&other))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let empty = res.json::<serde_json::Value>().await?;
    assert_eq!(empty["data"].as_array().unwrap().len(), 0);
    Ok(())
}

#[tokio::test]
async fn cross_owner_access_looks_like_not_found() -> Result<()> {
    if !database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = fresh_user("alice");
    let intruder = fresh_user("bob");

    let created = client
        .post(format!("{}/api/{}/tasks", server.base_url, owner))
        .bearer_auth(common::token_for(&owner))
        .json(&json!({"title": "private"}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let task_id = created["data"]["id"].as_str().unwrap().to_string();

    // The intruder operates under their own identity on the real id; every
    // operation must answer exactly as if the id did not exist
    let intruder_token = common::token_for(&intruder);
    let base = &server.base_url;

    let attempts = vec![
        client.get(format!("{}/api/{}/tasks/{}", base, intruder, task_id)),
        client
            .put(format!("{}/api/{}/tasks/{}", base, intruder, task_id))
            .json(&json!({"title": "stolen"})),
        client.delete(format!("{}/api/{}/tasks/{}", base, intruder, task_id)),
        client.patch(format!("{}/api/{}/tasks/{}/complete", base, intruder, task_id)),
    ];

    for attempt in attempts {
        let res = attempt.bearer_auth(&intruder_token).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "NOT_FOUND");
    }

    // The owner still sees the task untouched
    let res = client
        .get(format!("{}/api/{}/tasks/{}", base, owner, task_id))
        .bearer_auth(common::token_for(&owner))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["title"], "private");
    Ok(())
}

#[tokio::test]
async fn toggle_toggle_delete_scenario() -> Result<()> {
    if !database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let user = fresh_user("scenario");
    let token = common::token_for(&user);
    let base = &server.base_url;

    let created = client
        .post(format!("{}/api/{}/tasks", base, user))
        .bearer_auth(&token)
        .json(&json!({"title": "Buy milk"}))
        .send()
        .await?;
    assert_eq!(created.status(), StatusCode::OK);
    let created = created.json::<serde_json::Value>().await?;
    assert_eq!(created["data"]["completed"], false);
    let task_id = created["data"]["id"].as_str().unwrap().to_string();

    let toggled = client
        .patch(format!("{}/api/{}/tasks/{}/complete", base, user, task_id))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(toggled["data"]["completed"], true);

    let toggled_back = client
        .patch(format!("{}/api/{}/tasks/{}/complete", base, user, task_id))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(toggled_back["data"]["completed"], false);

    let deleted = client
        .delete(format!("{}/api/{}/tasks/{}", base, user, task_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::OK);
    let deleted = deleted.json::<serde_json::Value>().await?;
    assert_eq!(deleted["data"]["message"], "Task deleted successfully");

    let gone = client
        .get(format!("{}/api/{}/tasks/{}", base, user, task_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    Ok(())
}
