use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Difficulty scale stored as a smallint (Easy=1, Medium=2, Hard=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
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
    pub author_id: Uuid,
}

/// Ordered child row of a recipe (same shape for ingredients and steps)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeItem {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub display_order: i32,
    pub value: String,
}
