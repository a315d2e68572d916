use sqlx::PgPool;

use crate::access;
use crate::api::{CookbookEntryResponse, CookbookResponse, RecipeResponse};
use crate::database::manager::DatabaseManager;
use crate::database::models::{Author, Cookbook, Recipe};
use crate::database::repos::{authors, cookbooks, recipes};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

pub async fn pool() -> Result<PgPool, ApiError> {
    DatabaseManager::pool().await.map_err(Into::into)
}

/// Resolve the authenticated principal to its author row. The token can
/// outlive the account, so this is a real 404 case.
pub async fn current_author(pool: &PgPool, user: &AuthUser) -> Result<Author, ApiError> {
    authors::find_by_username(pool, &user.username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// Assemble the full recipe wire object (author + ingredients + steps)
pub async fn recipe_response(pool: &PgPool, recipe: Recipe) -> Result<RecipeResponse, ApiError> {
    let author = authors::find_by_id(pool, recipe.author_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Recipe author missing"))?;
    let ingredients = recipes::ingredients_for(pool, recipe.id).await?;
    let steps = recipes::steps_for(pool, recipe.id).await?;
    Ok(RecipeResponse::from_parts(recipe, author, ingredients, steps))
}

pub async fn recipe_responses(pool: &PgPool, rows: Vec<Recipe>) -> Result<Vec<RecipeResponse>, ApiError> {
    let mut out = Vec::with_capacity(rows.len());
    for recipe in rows {
        out.push(recipe_response(pool, recipe).await?);
    }
    Ok(out)
}

/// Assemble the cookbook wire object. Private recipes are filtered from the
/// entry list unless the viewer may see them (owner or admin); the join rows
/// stay in storage either way.
pub async fn cookbook_response(
    pool: &PgPool,
    cookbook: Cookbook,
    viewer: Option<&AuthUser>,
) -> Result<CookbookResponse, ApiError> {
    let author = authors::find_by_id(pool, cookbook.author_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Cookbook author missing"))?;

    let mut entries = Vec::new();
    for entry in cookbooks::entries_for(pool, cookbook.id).await? {
        let Some(recipe) = recipes::find_by_id(pool, entry.recipe_id).await? else {
            continue;
        };
        if !access::can_view(recipe.is_private, &author.username, viewer) {
            continue;
        }
        let recipe = recipe_response(pool, recipe).await?;
        entries.push(CookbookEntryResponse::new(&entry, recipe));
    }

    Ok(CookbookResponse::from_parts(cookbook, author, entries))
}
