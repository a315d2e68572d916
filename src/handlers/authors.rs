use axum::{response::Json, Extension};

use crate::api::{ApiResponse, AuthorResponse, PasswordUpdateRequest, ProfileUpdateRequest};
use crate::auth;
use crate::database::repos::authors::{self, ProfileUpdate};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

use super::utils;

/// GET /api/authors/me
pub async fn my_profile(Extension(user): Extension<AuthUser>) -> Result<ApiResponse<AuthorResponse>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;
    Ok(ApiResponse::success(author.into()))
}

/// PUT /api/authors/me - update profile fields (never username or role)
pub async fn update_profile(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;

    let update = ProfileUpdate {
        first_name: payload.first_name,
        last_name: payload.last_name,
        nationality: payload.nationality,
        image: payload.image,
        biography: payload.biography,
        pseudonym: payload.pseudonym,
        email_contact: payload.email_contact,
    };

    let rows = authors::update_profile(&pool, &user.username, &update).await?;
    if rows == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(ApiResponse::no_content())
}

/// PATCH /api/authors/me/password
pub async fn update_password(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<PasswordUpdateRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    let pool = utils::pool().await?;
    let author = utils::current_author(&pool, &user).await?;

    if !auth::verify_password(&payload.old_password, &author.password_hash) {
        return Err(ApiError::bad_request("Old password is incorrect"));
    }

    let new_hash = auth::hash_password(&payload.new_password);
    authors::update_password(&pool, &user.username, &new_hash).await?;

    Ok(ApiResponse::no_content())
}
