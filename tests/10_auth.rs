mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    // We consider OK or SERVICE_UNAVAILABLE acceptable as a basic liveness check
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let _body = res.json::<Value>().await?;
    Ok(())
}

#[tokio::test]
async fn register_and_login_roundtrip() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let username = common::unique("mary");

    let res = client
        .post(format!("{}/api/authors", server.base_url))
        .json(&json!({
            "username": username,
            "password": "secret123",
            "first_name": "Maria",
            "last_name": "da Silva",
            "nationality": "Brazilian"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], username.as_str());
    assert_eq!(body["data"]["admin"], false);
    // The password digest must never leak into responses
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "username": username, "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert!(body["data"]["expires_in"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["author"]["username"], username.as_str());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let username = common::unique("dup");

    let payload = json!({
        "username": username,
        "password": "secret123",
        "first_name": "First",
        "last_name": "Taken"
    });

    let res = client
        .post(format!("{}/api/authors", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/api/authors", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn register_requires_username_and_password() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/authors", server.base_url))
        .json(&json!({
            "username": "",
            "password": "",
            "first_name": "No",
            "last_name": "Name"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (username, _token) = common::signup(server).await?;

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "username": username, "password": "not-the-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_bearer_token() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/recipes/mine", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/recipes/mine", server.base_url))
        .bearer_auth("not.a.jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn profile_update_and_password_change() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (username, token) = common::signup(server).await?;

    let res = client
        .get(format!("{}/api/authors/me", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["username"], username.as_str());

    let res = client
        .put(format!("{}/api/authors/me", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "first_name": "Renamed",
            "last_name": "Author",
            "biography": "I write recipes now."
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/authors/me", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["first_name"], "Renamed");
    assert_eq!(body["data"]["biography"], "I write recipes now.");

    // Wrong old password is rejected
    let res = client
        .patch(format!("{}/api/authors/me/password", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "old_password": "wrong", "new_password": "rotated456" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .patch(format!("{}/api/authors/me/password", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "old_password": "secret123", "new_password": "rotated456" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Old password no longer works, the new one does
    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "username": username, "password": "secret123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    common::login(server, &username, "rotated456").await?;
    Ok(())
}
