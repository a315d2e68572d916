use axum::{extract::Path, Extension};
use uuid::Uuid;

use crate::access;
use crate::api::{ApiResponse, AuthorResponse, CookbookResponse, RecipeResponse};
use crate::database::repos::{authors, cookbooks, recipes};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

use super::utils;

/// GET /api/admin/authors
pub async fn list_authors(Extension(user): Extension<AuthUser>) -> Result<ApiResponse<Vec<AuthorResponse>>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;
    let rows = authors::list_all(&pool).await?;
    Ok(ApiResponse::success(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/admin/authors/:id
pub async fn get_author(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<AuthorResponse>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;
    let author = authors::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Author not found"))?;
    Ok(ApiResponse::success(author.into()))
}

/// GET /api/admin/recipes - every recipe, private included
pub async fn list_recipes(Extension(user): Extension<AuthUser>) -> Result<ApiResponse<Vec<RecipeResponse>>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;
    let rows = recipes::list_all(&pool).await?;
    Ok(ApiResponse::success(utils::recipe_responses(&pool, rows).await?))
}

/// GET /api/admin/recipes/:id
pub async fn get_recipe(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<RecipeResponse>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;
    let recipe = recipes::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;
    Ok(ApiResponse::success(utils::recipe_response(&pool, recipe).await?))
}

/// DELETE /api/admin/recipes/:id - same cascade as an owner delete
pub async fn delete_recipe(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;

    if recipes::find_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Recipe not found"));
    }

    recipes::delete(&pool, id).await.map_err(|e| {
        tracing::error!("admin recipe delete transaction failed: {}", e);
        ApiError::bad_request("Failed to delete the recipe")
    })?;

    Ok(ApiResponse::no_content())
}

/// GET /api/admin/cookbooks - every cookbook, with private recipes visible
pub async fn list_cookbooks(
    Extension(user): Extension<AuthUser>,
) -> Result<ApiResponse<Vec<CookbookResponse>>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;
    let mut out = Vec::new();
    for cookbook in cookbooks::list_all(&pool).await? {
        out.push(utils::cookbook_response(&pool, cookbook, Some(&user)).await?);
    }
    Ok(ApiResponse::success(out))
}

/// GET /api/admin/cookbooks/:id
pub async fn get_cookbook(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<CookbookResponse>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;
    let cookbook = cookbooks::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Cookbook not found"))?;
    Ok(ApiResponse::success(utils::cookbook_response(&pool, cookbook, Some(&user)).await?))
}

/// DELETE /api/admin/cookbooks/:id
pub async fn delete_cookbook(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    access::require_admin(&user)?;
    let pool = utils::pool().await?;

    if cookbooks::find_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Cookbook not found"));
    }

    cookbooks::delete(&pool, id).await.map_err(|e| {
        tracing::error!("admin cookbook delete transaction failed: {}", e);
        ApiError::bad_request("Failed to delete the cookbook")
    })?;

    Ok(ApiResponse::no_content())
}
