//! Wire format: request payloads, response DTOs and the success envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::access::EntryInput;
use crate::database::models::{Author, Cookbook, CookbookRecipe, Difficulty, Recipe, RecipeItem};

/// Wrapper that renders `{ "success": true, "data": ... }` with a status code
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    data: T,
    status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data, status_code: StatusCode::OK }
    }

    pub fn created(data: T) -> Self {
        Self { data, status_code: StatusCode::CREATED }
    }
}

impl ApiResponse<()> {
    pub fn no_content() -> Self {
        Self { data: (), status_code: StatusCode::NO_CONTENT }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        if self.status_code == StatusCode::NO_CONTENT {
            return self.status_code.into_response();
        }

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": true, "message": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        (self.status_code, Json(json!({ "success": true, "data": data_value }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Auth & authors

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub author: AuthorResponse,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub biography: Option<String>,
    pub pseudonym: Option<String>,
    pub email_contact: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub biography: Option<String>,
    pub pseudonym: Option<String>,
    pub email_contact: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordUpdateRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Public author profile; never exposes the password digest
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
    pub admin: bool,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub biography: Option<String>,
    pub pseudonym: Option<String>,
    pub email_contact: Option<String>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            username: author.username,
            admin: author.admin,
            first_name: author.first_name,
            last_name: author.last_name,
            nationality: author.nationality,
            image: author.image,
            biography: author.biography,
            pseudonym: author.pseudonym,
            email_contact: author.email_contact,
        }
    }
}

// ---------------------------------------------------------------------------
// Recipes

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub display_order: i32,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_private: bool,
    pub preparation_time_minutes: i32,
    pub servings: String,
    pub accent_color: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<ItemRequest>,
    #[serde(default)]
    pub steps: Vec<ItemRequest>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub display_order: i32,
    pub value: String,
}

impl From<RecipeItem> for ItemResponse {
    fn from(item: RecipeItem) -> Self {
        Self { id: item.id, display_order: item.display_order, value: item.value }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub difficulty: Difficulty,
    pub is_private: bool,
    pub preparation_time_minutes: i32,
    pub servings: String,
    pub date_added: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub accent_color: String,
    pub author: AuthorResponse,
    pub ingredients: Vec<ItemResponse>,
    pub steps: Vec<ItemResponse>,
}

impl RecipeResponse {
    pub fn from_parts(
        recipe: Recipe,
        author: Author,
        ingredients: Vec<RecipeItem>,
        steps: Vec<RecipeItem>,
    ) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            image: recipe.image,
            difficulty: recipe.difficulty,
            is_private: recipe.is_private,
            preparation_time_minutes: recipe.preparation_time_minutes,
            servings: recipe.servings,
            date_added: recipe.date_added,
            date_updated: recipe.date_updated,
            accent_color: recipe.accent_color,
            author: author.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Cookbooks

#[derive(Debug, Deserialize)]
pub struct CookbookRequest {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    pub accent_color: Option<String>,
    #[serde(default)]
    pub recipes: Vec<EntryInput>,
}

#[derive(Debug, Serialize)]
pub struct CookbookEntryResponse {
    pub recipe: RecipeResponse,
    pub display_order: i32,
    pub date_added: DateTime<Utc>,
}

impl CookbookEntryResponse {
    pub fn new(entry: &CookbookRecipe, recipe: RecipeResponse) -> Self {
        Self {
            recipe,
            display_order: entry.display_order,
            date_added: entry.date_added,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CookbookResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_private: bool,
    pub date_added: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub accent_color: String,
    pub author: AuthorResponse,
    pub recipes: Vec<CookbookEntryResponse>,
}

impl CookbookResponse {
    pub fn from_parts(cookbook: Cookbook, author: Author, recipes: Vec<CookbookEntryResponse>) -> Self {
        Self {
            id: cookbook.id,
            title: cookbook.title,
            description: cookbook.description,
            image: cookbook.image,
            is_private: cookbook.is_private,
            date_added: cookbook.date_added,
            date_updated: cookbook.date_updated,
            accent_color: cookbook.accent_color,
            author: author.into(),
            recipes,
        }
    }
}

/// Fallback accent color when a request omits one (matches the original data)
pub const DEFAULT_ACCENT_COLOR: &str = "#333";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_response_never_serializes_password() {
        let author = Author {
            id: Uuid::new_v4(),
            username: "mary".to_string(),
            password_hash: "super-secret-digest".to_string(),
            admin: false,
            first_name: "Maria".to_string(),
            last_name: "da Silva".to_string(),
            nationality: None,
            image: None,
            biography: None,
            pseudonym: None,
            email_contact: None,
        };
        let body = serde_json::to_string(&AuthorResponse::from(author)).unwrap();
        assert!(!body.contains("super-secret-digest"));
        assert!(!body.contains("password"));
    }

    #[test]
    fn recipe_request_defaults_are_permissive() {
        let req: RecipeRequest = serde_json::from_value(json!({
            "title": "Bolo de Chocolate",
            "difficulty": "Easy",
            "preparation_time_minutes": 45,
            "servings": "8 portions"
        }))
        .unwrap();
        assert!(!req.is_private);
        assert!(req.ingredients.is_empty());
        assert!(req.steps.is_empty());
        assert!(req.accent_color.is_none());
    }
}
