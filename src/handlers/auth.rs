use axum::response::Json;

use crate::api::{ApiResponse, AuthorResponse, LoginRequest, LoginResponse, RegisterRequest};
use crate::auth::{self, Claims, Role};
use crate::database::repos::authors::{self, NewAuthor};
use crate::error::ApiError;

use super::utils;

/// POST /api/auth/login - validate credentials and issue a bearer token
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<ApiResponse<LoginResponse>, ApiError> {
    let pool = utils::pool().await?;

    let author = authors::find_by_username(&pool, &payload.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !auth::verify_password(&payload.password, &author.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let role = if author.admin { Role::Admin } else { Role::Author };
    let claims = Claims::new(author.username.clone(), role, author.id);
    let expires_in = claims.exp - claims.iat;
    let token = auth::generate_jwt(&claims)?;

    tracing::info!(username = %author.username, "author logged in");

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in,
        author: author.into(),
    }))
}

/// POST /api/authors - register a new author (public)
pub async fn register(Json(payload): Json<RegisterRequest>) -> Result<ApiResponse<AuthorResponse>, ApiError> {
    let pool = utils::pool().await?;

    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    if authors::find_by_username(&pool, &payload.username).await?.is_some() {
        return Err(ApiError::conflict("An author with this username already exists"));
    }

    let new = NewAuthor {
        username: payload.username,
        password_hash: auth::hash_password(&payload.password),
        first_name: payload.first_name,
        last_name: payload.last_name,
        nationality: payload.nationality,
        image: payload.image,
        biography: payload.biography,
        pseudonym: payload.pseudonym,
        email_contact: payload.email_contact,
    };

    let author = authors::insert(&pool, &new).await?;

    Ok(ApiResponse::created(author.into()))
}
