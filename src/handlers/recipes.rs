use axum::{extract::Path, response::Json, Extension};
use uuid::Uuid;

use crate::access;
use crate::api::{ApiResponse, RecipeRequest, RecipeResponse, DEFAULT_ACCENT_COLOR};
use crate::database::repos::authors;
use crate::database::repos::recipes::{self, NewRecipe, RecipeItemInput};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

use super::utils;

/// GET /api/recipes - all public recipes (anonymous)
pub async fn list_public() -> Result<ApiResponse<Vec<RecipeResponse>>, ApiError> {
    let pool = utils::pool().await?;
    let rows = recipes::list_public(&pool).await?;
    Ok(ApiResponse::success(utils::recipe_responses(&pool, rows).await?))
}

/// GET /api/recipes/mine - the authenticated author's recipes, private included
pub async fn list_mine(Extension(user): Extension<AuthUser>) -> Result<ApiResponse<Vec<RecipeResponse>>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;
    let rows = recipes::list_by_author(&pool, author.id).await?;
    Ok(ApiResponse::success(utils::recipe_responses(&pool, rows).await?))
}

/// POST /api/recipes - create a recipe owned by the authenticated author
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RecipeRequest>,
) -> Result<ApiResponse<RecipeResponse>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;

    let (new, ingredients, steps) = request_parts(payload, author.id);

    let recipe = recipes::create(&pool, &new, &ingredients, &steps)
        .await
        .map_err(|e| {
            tracing::error!("recipe create transaction failed: {}", e);
            ApiError::bad_request("Failed to create the recipe")
        })?;

    Ok(ApiResponse::created(utils::recipe_response(&pool, recipe).await?))
}

/// GET /api/recipes/:id - private recipes are visible to owner and admin only
pub async fn get_by_id(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<RecipeResponse>, ApiError> {
    let pool = utils::pool().await?;

    let recipe = recipes::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    let owner = authors::find_by_id(&pool, recipe.author_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Recipe author missing"))?;

    if !access::can_view(recipe.is_private, &owner.username, Some(&user)) {
        return Err(ApiError::forbidden("You are not allowed to access this private recipe"));
    }

    Ok(ApiResponse::success(utils::recipe_response(&pool, recipe).await?))
}

/// PUT /api/recipes/:id - owner only; ingredients and steps are replaced
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecipeRequest>,
) -> Result<ApiResponse<RecipeResponse>, ApiError> {
    let pool = utils::pool().await?;

    let recipe = recipes::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    let owner = authors::find_by_id(&pool, recipe.author_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Recipe author missing"))?;
    access::require_owner(&owner.username, &user)?;

    let (changes, ingredients, steps) = request_parts(payload, recipe.author_id);

    let updated = recipes::update(&pool, id, &changes, &ingredients, &steps)
        .await
        .map_err(|e| {
            tracing::error!("recipe update transaction failed: {}", e);
            ApiError::bad_request("Failed to update the recipe")
        })?;

    Ok(ApiResponse::success(utils::recipe_response(&pool, updated).await?))
}

/// DELETE /api/recipes/:id - owner only; cascades to cookbook entries and
/// favorites but never deletes cookbooks or authors
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;

    let recipe = recipes::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    let owner = authors::find_by_id(&pool, recipe.author_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Recipe author missing"))?;
    access::require_owner(&owner.username, &user)?;

    recipes::delete(&pool, id).await.map_err(|e| {
        tracing::error!("recipe delete transaction failed: {}", e);
        ApiError::bad_request("Failed to delete the recipe")
    })?;

    Ok(ApiResponse::no_content())
}

fn request_parts(payload: RecipeRequest, author_id: Uuid) -> (NewRecipe, Vec<RecipeItemInput>, Vec<RecipeItemInput>) {
    let new = NewRecipe {
        title: payload.title,
        description: payload.description,
        image: payload.image,
        difficulty: payload.difficulty,
        is_private: payload.is_private,
        preparation_time_minutes: payload.preparation_time_minutes,
        servings: payload.servings,
        accent_color: payload.accent_color.unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        author_id,
    };
    let ingredients = payload
        .ingredients
        .into_iter()
        .map(|i| RecipeItemInput { display_order: i.display_order, value: i.value })
        .collect();
    let steps = payload
        .steps
        .into_iter()
        .map(|s| RecipeItemInput { display_order: s.display_order, value: s.value })
        .collect();
    (new, ingredients, steps)
}
