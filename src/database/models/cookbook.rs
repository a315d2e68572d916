use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cookbook {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_private: bool,
    pub date_added: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub accent_color: String,
    pub author_id: Uuid,
}

/// Join row linking a recipe into a cookbook.
/// UNIQUE (cookbook_id, recipe_id): a recipe appears at most once per cookbook.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CookbookRecipe {
    pub id: Uuid,
    pub cookbook_id: Uuid,
    pub recipe_id: Uuid,
    pub display_order: i32,
    pub date_added: DateTime<Utc>,
}
