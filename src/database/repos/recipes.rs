use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Difficulty, Recipe, RecipeItem};

pub struct NewRecipe {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub difficulty: Difficulty,
    pub is_private: bool,
    pub preparation_time_minutes: i32,
    pub servings: String,
    pub accent_color: String,
    pub author_id: Uuid,
}

/// Ordered child row submitted with a recipe (ingredient or step)
pub struct RecipeItemInput {
    pub display_order: i32,
    pub value: String,
}

pub async fn list_public(pool: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE NOT is_private ORDER BY date_added DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_author(pool: &PgPool, author_id: Uuid) -> Result<Vec<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE author_id = $1 ORDER BY date_added DESC")
        .bind(author_id)
        .fetch_all(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes ORDER BY date_added DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn ingredients_for(pool: &PgPool, recipe_id: Uuid) -> Result<Vec<RecipeItem>, sqlx::Error> {
    sqlx::query_as::<_, RecipeItem>(
        "SELECT * FROM ingredients WHERE recipe_id = $1 ORDER BY display_order",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
}

pub async fn steps_for(pool: &PgPool, recipe_id: Uuid) -> Result<Vec<RecipeItem>, sqlx::Error> {
    sqlx::query_as::<_, RecipeItem>("SELECT * FROM steps WHERE recipe_id = $1 ORDER BY display_order")
        .bind(recipe_id)
        .fetch_all(pool)
        .await
}

/// Insert a recipe with its ingredients and steps in one transaction.
pub async fn create(
    pool: &PgPool,
    new: &NewRecipe,
    ingredients: &[RecipeItemInput],
    steps: &[RecipeItemInput],
) -> Result<Recipe, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let recipe = sqlx::query_as::<_, Recipe>(
        "INSERT INTO recipes \
           (title, description, image, difficulty, is_private, preparation_time_minutes, servings, accent_color, author_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING *",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.image)
    .bind(new.difficulty)
    .bind(new.is_private)
    .bind(new.preparation_time_minutes)
    .bind(&new.servings)
    .bind(&new.accent_color)
    .bind(new.author_id)
    .fetch_one(&mut *tx)
    .await?;

    insert_items(&mut tx, "ingredients", recipe.id, ingredients).await?;
    insert_items(&mut tx, "steps", recipe.id, steps).await?;

    tx.commit().await?;
    Ok(recipe)
}

/// Update a recipe's own columns and replace its child rows (delete + insert),
/// all in one transaction. Ownership is checked by the caller beforehand.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: &NewRecipe,
    ingredients: &[RecipeItemInput],
    steps: &[RecipeItemInput],
) -> Result<Recipe, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let recipe = sqlx::query_as::<_, Recipe>(
        "UPDATE recipes \
         SET title = $2, description = $3, image = $4, difficulty = $5, is_private = $6, \
             preparation_time_minutes = $7, servings = $8, accent_color = $9, date_updated = now() \
         WHERE id = $1 \
         RETURNING *",
    )
    .bind(id)
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(&changes.image)
    .bind(changes.difficulty)
    .bind(changes.is_private)
    .bind(changes.preparation_time_minutes)
    .bind(&changes.servings)
    .bind(&changes.accent_color)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM steps WHERE recipe_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_items(&mut tx, "ingredients", id, ingredients).await?;
    insert_items(&mut tx, "steps", id, steps).await?;

    tx.commit().await?;
    Ok(recipe)
}

/// Delete a recipe together with every cookbook entry and favorite referencing
/// it. Cookbooks and authors themselves are untouched. One transaction; any
/// failure rolls the whole set back.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM cookbook_recipes WHERE recipe_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM favorite_recipes WHERE recipe_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM steps WHERE recipe_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    table: &str,
    recipe_id: Uuid,
    items: &[RecipeItemInput],
) -> Result<(), sqlx::Error> {
    // Table name comes from the two call sites above, never from input
    let sql = format!(
        "INSERT INTO {} (recipe_id, display_order, value) VALUES ($1, $2, $3)",
        table
    );
    for item in items {
        sqlx::query(&sql)
            .bind(recipe_id)
            .bind(item.display_order)
            .bind(&item.value)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
