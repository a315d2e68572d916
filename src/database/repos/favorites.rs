use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Recipe;

pub async fn exists(pool: &PgPool, author_id: Uuid, recipe_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        "SELECT 1 FROM favorite_recipes WHERE author_id = $1 AND recipe_id = $2",
    )
    .bind(author_id)
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn insert(pool: &PgPool, author_id: Uuid, recipe_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO favorite_recipes (author_id, recipe_id) VALUES ($1, $2)")
        .bind(author_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns rows affected so the caller can report a missing favorite.
pub async fn delete(pool: &PgPool, author_id: Uuid, recipe_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM favorite_recipes WHERE author_id = $1 AND recipe_id = $2")
        .bind(author_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// The author's favorites whose recipe is still public. A recipe made private
/// after being favorited stays in storage but is hidden here.
pub async fn list_public_recipes_for(pool: &PgPool, author_id: Uuid) -> Result<Vec<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(
        "SELECT r.* FROM recipes r \
         JOIN favorite_recipes fr ON fr.recipe_id = r.id \
         WHERE fr.author_id = $1 AND NOT r.is_private \
         ORDER BY fr.date_added DESC",
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}
