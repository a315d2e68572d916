use axum::{extract::Path, Extension};
use uuid::Uuid;

use crate::api::{ApiResponse, RecipeResponse};
use crate::database::repos::{favorites, recipes};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

use super::utils;

/// POST /api/favorites/:recipe_id - favorite a public recipe
pub async fn favorite(
    Extension(user): Extension<AuthUser>,
    Path(recipe_id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;

    let recipe = recipes::find_by_id(&pool, recipe_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    if recipe.is_private {
        return Err(ApiError::bad_request("A private recipe cannot be favorited"));
    }

    if favorites::exists(&pool, author.id, recipe.id).await? {
        return Err(ApiError::conflict("Recipe already favorited"));
    }

    // Unique constraint backstops the pre-check; a racing insert surfaces as 409
    favorites::insert(&pool, author.id, recipe.id).await?;

    Ok(ApiResponse::created(()))
}

/// DELETE /api/favorites/:recipe_id - remove an existing favorite
pub async fn unfavorite(
    Extension(user): Extension<AuthUser>,
    Path(recipe_id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;

    let removed = favorites::delete(&pool, author.id, recipe_id).await?;
    if removed == 0 {
        return Err(ApiError::bad_request(
            "The recipe does not exist or has not been favorited",
        ));
    }

    Ok(ApiResponse::no_content())
}

/// GET /api/favorites - the author's favorites whose recipe is still public
pub async fn list_mine(Extension(user): Extension<AuthUser>) -> Result<ApiResponse<Vec<RecipeResponse>>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;

    let rows = favorites::list_public_recipes_for(&pool, author.id).await?;
    Ok(ApiResponse::success(utils::recipe_responses(&pool, rows).await?))
}
