mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_and_fetch_recipe() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (username, token) = common::signup(server).await?;

    let title = common::unique("feijoada");
    let recipe = common::create_recipe(server, &token, &common::recipe_payload(&title, false)).await?;

    assert_eq!(recipe["title"], title.as_str());
    assert_eq!(recipe["difficulty"], "Easy");
    assert_eq!(recipe["is_private"], false);
    assert_eq!(recipe["author"]["username"], username.as_str());
    assert_eq!(recipe["ingredients"].as_array().unwrap().len(), 2);
    let steps = recipe["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["display_order"], 1);
    assert_eq!(steps[1]["display_order"], 2);
    // Omitted accent color falls back to the default
    assert_eq!(recipe["accent_color"], "#333");

    let id = recipe["id"].as_str().unwrap();
    let res = client
        .get(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Public catalog lists it without authentication
    let res = client.get(format!("{}/api/recipes", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let listed = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == id);
    assert!(listed, "public list should contain the new recipe");
    Ok(())
}

#[tokio::test]
async fn private_recipes_hidden_from_other_viewers() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_owner, owner_token) = common::signup(server).await?;
    let (_other, other_token) = common::signup(server).await?;

    let title = common::unique("secret-sauce");
    let recipe = common::create_recipe(server, &owner_token, &common::recipe_payload(&title, true)).await?;
    let id = recipe["id"].as_str().unwrap();

    // Absent from the public catalog
    let res = client.get(format!("{}/api/recipes", server.base_url)).send().await?;
    let body = res.json::<Value>().await?;
    assert!(
        !body["data"].as_array().unwrap().iter().any(|r| r["id"] == id),
        "private recipe must not appear in the public list"
    );

    // Direct fetch by another author is forbidden
    let res = client
        .get(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The owner still sees it, both directly and in /mine
    let res = client
        .get(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/recipes/mine", server.base_url))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert!(body["data"].as_array().unwrap().iter().any(|r| r["id"] == id));
    Ok(())
}

#[tokio::test]
async fn update_replaces_ingredients_and_steps() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_username, token) = common::signup(server).await?;

    let title = common::unique("pudim");
    let recipe = common::create_recipe(server, &token, &common::recipe_payload(&title, false)).await?;
    let id = recipe["id"].as_str().unwrap();

    let res = client
        .put(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({
            "title": format!("{} v2", title),
            "difficulty": "Hard",
            "preparation_time_minutes": 90,
            "servings": "12 portions",
            "ingredients": [
                { "display_order": 1, "value": "1 can condensed milk" }
            ],
            "steps": [
                { "display_order": 1, "value": "Caramelize the sugar" },
                { "display_order": 2, "value": "Blend and bake" },
                { "display_order": 3, "value": "Chill overnight" }
            ]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let updated = &body["data"];
    assert_eq!(updated["title"], format!("{} v2", title));
    assert_eq!(updated["difficulty"], "Hard");
    // Children are replaced wholesale, not appended
    assert_eq!(updated["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(updated["steps"].as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn update_and_delete_require_ownership() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_owner, owner_token) = common::signup(server).await?;
    let (_other, other_token) = common::signup(server).await?;

    let title = common::unique("guarded");
    let recipe = common::create_recipe(server, &owner_token, &common::recipe_payload(&title, false)).await?;
    let id = recipe["id"].as_str().unwrap();

    let res = client
        .put(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&other_token)
        .json(&common::recipe_payload("hijacked", false))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn delete_cascades_to_favorites_and_children() -> Result<()> {
    if !common::db_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_owner, owner_token) = common::signup(server).await?;
    let (_fan, fan_token) = common::signup(server).await?;

    let title = common::unique("doomed");
    let recipe = common::create_recipe(server, &owner_token, &common::recipe_payload(&title, false)).await?;
    let id = recipe["id"].as_str().unwrap();

    let cookbook = common::create_cookbook(
        server,
        &owner_token,
        &json!({
            "title": common::unique("holder"),
            "recipes": [ { "recipe_id": id, "display_order": 1 } ]
        }),
    )
    .await?;
    let cookbook_id = cookbook["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/api/favorites/{}", server.base_url, id))
        .bearer_auth(&fan_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .delete(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/recipes/{}", server.base_url, id))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The favorite row went with it
    let res = client
        .get(format!("{}/api/favorites", server.base_url))
        .bearer_auth(&fan_token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert!(!body["data"].as_array().unwrap().iter().any(|r| r["id"] == id));

    // So did the cookbook entry; the cookbook itself is untouched
    let res = client
        .get(format!("{}/api/cookbooks/{}", server.base_url, cookbook_id))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert!(body["data"]["recipes"].as_array().unwrap().is_empty());
    Ok(())
}
