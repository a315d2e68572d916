mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn admin_routes_reject_regular_authors() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_username, token) = common::signup(server).await?;

    // Registration never grants the admin role, so every admin route is a 403
    for path in [
        "/api/admin/authors",
        "/api/admin/recipes",
        "/api/admin/cookbooks",
    ] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "expected 403 for {}", path);

        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "FORBIDDEN");
    }
    Ok(())
}

#[tokio::test]
async fn admin_delete_routes_reject_regular_authors() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_owner, owner_token) = common::signup(server).await?;
    let (_other, other_token) = common::signup(server).await?;

    let recipe = common::create_recipe(server, &owner_token, &common::recipe_payload(&common::unique("kept"), false)).await?;
    let id = recipe["id"].as_str().unwrap();

    // The role check runs before any lookup or delete
    let res = client
        .delete(format!("{}/api/admin/recipes/{}", server.base_url, id))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The recipe is untouched
    let res = client
        .get(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_a_token_at_all() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/admin/authors", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
