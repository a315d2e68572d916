use axum::{
    extract::{Path, Query},
    response::Json,
    Extension,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::access::{self, EntryInput};
use crate::api::{ApiResponse, CookbookRequest, CookbookResponse, DEFAULT_ACCENT_COLOR};
use crate::database::models::{Author, Cookbook};
use crate::database::repos::{authors, cookbooks, recipes};
use crate::database::repos::cookbooks::NewCookbook;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

use super::utils;

/// GET /api/cookbooks - all public cookbooks (anonymous); private recipes are
/// filtered out of every entry list
pub async fn list_public() -> Result<ApiResponse<Vec<CookbookResponse>>, ApiError> {
    let pool = utils::pool().await?;
    let mut out = Vec::new();
    for cookbook in cookbooks::list_public(&pool).await? {
        out.push(utils::cookbook_response(&pool, cookbook, None).await?);
    }
    Ok(ApiResponse::success(out))
}

/// GET /api/cookbooks/mine
pub async fn list_mine(Extension(user): Extension<AuthUser>) -> Result<ApiResponse<Vec<CookbookResponse>>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;
    let mut out = Vec::new();
    for cookbook in cookbooks::list_by_author(&pool, author.id).await? {
        out.push(utils::cookbook_response(&pool, cookbook, Some(&user)).await?);
    }
    Ok(ApiResponse::success(out))
}

/// POST /api/cookbooks - create a cookbook with an optional initial entry list
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CookbookRequest>,
) -> Result<ApiResponse<CookbookResponse>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;

    validate_entries(&pool, &author, &payload.recipes).await?;

    let new = NewCookbook {
        title: payload.title,
        description: payload.description,
        image: payload.image,
        is_private: payload.is_private,
        accent_color: payload.accent_color.unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        author_id: author.id,
    };

    let cookbook = cookbooks::create(&pool, &new, &payload.recipes).await.map_err(|e| {
        tracing::error!("cookbook create transaction failed: {}", e);
        ApiError::bad_request("Failed to create the cookbook")
    })?;

    Ok(ApiResponse::created(utils::cookbook_response(&pool, cookbook, Some(&user)).await?))
}

/// GET /api/cookbooks/:id - private cookbooks are visible to owner and admin
/// only; non-owners see only the public recipes inside
pub async fn get_by_id(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<CookbookResponse>, ApiError> {
    let pool = utils::pool().await?;

    let (cookbook, owner) = find_with_owner(&pool, id).await?;

    if !access::can_view(cookbook.is_private, &owner.username, Some(&user)) {
        return Err(ApiError::forbidden("You are not allowed to access this private cookbook"));
    }

    Ok(ApiResponse::success(utils::cookbook_response(&pool, cookbook, Some(&user)).await?))
}

/// PUT /api/cookbooks/:id - owner only. The entry list is reconciled as a
/// delete + insert diff; rows present in both storage and the request are left
/// untouched.
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CookbookRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;

    let (cookbook, owner) = find_with_owner(&pool, id).await?;
    access::require_owner(&owner.username, &user)?;

    if let Some(dup) = access::duplicate_recipe_id(&payload.recipes) {
        return Err(ApiError::bad_request(format!(
            "Duplicate recipe in cookbook. RecipeId: {}",
            dup
        )));
    }

    let existing = cookbooks::entry_recipe_ids(&pool, id).await?;
    let diff = access::diff_entries(&existing, &payload.recipes);

    // Only new entries need validation; surviving rows were validated when
    // they were first inserted and ownership is immutable.
    validate_new_entries(&pool, &owner, &diff.to_insert).await?;

    let changes = NewCookbook {
        title: payload.title,
        description: payload.description,
        image: payload.image,
        is_private: payload.is_private,
        accent_color: payload.accent_color.unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        author_id: cookbook.author_id,
    };

    cookbooks::update(&pool, id, &changes, &diff.to_delete, &diff.to_insert)
        .await
        .map_err(|e| {
            tracing::error!("cookbook update transaction failed: {}", e);
            ApiError::bad_request("Failed to update the cookbook")
        })?;

    Ok(ApiResponse::no_content())
}

/// DELETE /api/cookbooks/:id - owner only; removes the entries, never the recipes
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;

    let (_, owner) = find_with_owner(&pool, id).await?;
    access::require_owner(&owner.username, &user)?;

    cookbooks::delete(&pool, id).await.map_err(|e| {
        tracing::error!("cookbook delete transaction failed: {}", e);
        ApiError::bad_request("Failed to delete the cookbook")
    })?;

    Ok(ApiResponse::no_content())
}

#[derive(Debug, Deserialize)]
pub struct AddRecipeQuery {
    pub order: Option<i32>,
}

/// POST /api/cookbooks/:id/recipes/:recipe_id?order=N - add a single recipe
pub async fn add_recipe(
    Extension(user): Extension<AuthUser>,
    Path((id, recipe_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<AddRecipeQuery>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;

    let (cookbook, owner) = find_with_owner(&pool, id).await?;
    access::require_owner(&owner.username, &user)?;

    let recipe = recipes::find_by_id(&pool, recipe_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    if recipe.author_id != cookbook.author_id {
        return Err(ApiError::bad_request("The recipe does not belong to the cookbook's author"));
    }

    let existing = cookbooks::entry_recipe_ids(&pool, id).await?;
    if existing.contains(&recipe_id) {
        return Err(ApiError::conflict("The recipe is already in the cookbook"));
    }

    let entry = EntryInput {
        recipe_id,
        display_order: query.order.unwrap_or(0),
    };
    // Unique constraint backstops the pre-check; a racing insert surfaces as 409
    cookbooks::add_entry(&pool, id, &entry).await?;

    Ok(ApiResponse::no_content())
}

/// DELETE /api/cookbooks/:id/recipes/:recipe_id - remove a single entry
pub async fn remove_recipe(
    Extension(user): Extension<AuthUser>,
    Path((id, recipe_id)): Path<(Uuid, Uuid)>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;

    let (_, owner) = find_with_owner(&pool, id).await?;
    access::require_owner(&owner.username, &user)?;

    let removed = cookbooks::remove_entry(&pool, id, recipe_id).await?;
    if removed == 0 {
        return Err(ApiError::not_found("Recipe not found in the cookbook"));
    }

    Ok(ApiResponse::no_content())
}

async fn find_with_owner(pool: &PgPool, id: Uuid) -> Result<(Cookbook, Author), ApiError> {
    let cookbook = cookbooks::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Cookbook not found"))?;
    let owner = authors::find_by_id(pool, cookbook.author_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Cookbook author missing"))?;
    Ok((cookbook, owner))
}

/// Per-entry validation for a submitted list: no duplicates, every recipe must
/// exist, and every recipe must belong to the cookbook's author.
async fn validate_entries(pool: &PgPool, owner: &Author, entries: &[EntryInput]) -> Result<(), ApiError> {
    if let Some(dup) = access::duplicate_recipe_id(entries) {
        return Err(ApiError::bad_request(format!(
            "Duplicate recipe in cookbook. RecipeId: {}",
            dup
        )));
    }
    validate_new_entries(pool, owner, entries).await
}

async fn validate_new_entries(pool: &PgPool, owner: &Author, entries: &[EntryInput]) -> Result<(), ApiError> {
    for entry in entries {
        let recipe = recipes::find_by_id(pool, entry.recipe_id)
            .await?
            .ok_or_else(|| {
                ApiError::bad_request(format!("Recipe not found. RecipeId: {}", entry.recipe_id))
            })?;
        if recipe.author_id != owner.id {
            return Err(ApiError::bad_request(format!(
                "The recipe does not belong to the cookbook's author. RecipeId: {}",
                entry.recipe_id
            )));
        }
    }
    Ok(())
}
