use sqlx::PgPool;
use uuid::Uuid;

use crate::access::EntryInput;
use crate::database::models::{Cookbook, CookbookRecipe};

pub struct NewCookbook {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_private: bool,
    pub accent_color: String,
    pub author_id: Uuid,
}

pub async fn list_public(pool: &PgPool) -> Result<Vec<Cookbook>, sqlx::Error> {
    sqlx::query_as::<_, Cookbook>("SELECT * FROM cookbooks WHERE NOT is_private ORDER BY date_added DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_author(pool: &PgPool, author_id: Uuid) -> Result<Vec<Cookbook>, sqlx::Error> {
    sqlx::query_as::<_, Cookbook>("SELECT * FROM cookbooks WHERE author_id = $1 ORDER BY date_added DESC")
        .bind(author_id)
        .fetch_all(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Cookbook>, sqlx::Error> {
    sqlx::query_as::<_, Cookbook>("SELECT * FROM cookbooks ORDER BY date_added DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Cookbook>, sqlx::Error> {
    sqlx::query_as::<_, Cookbook>("SELECT * FROM cookbooks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Join rows for a cookbook, ordered for display
pub async fn entries_for(pool: &PgPool, cookbook_id: Uuid) -> Result<Vec<CookbookRecipe>, sqlx::Error> {
    sqlx::query_as::<_, CookbookRecipe>(
        "SELECT * FROM cookbook_recipes WHERE cookbook_id = $1 ORDER BY display_order",
    )
    .bind(cookbook_id)
    .fetch_all(pool)
    .await
}

/// Recipe ids currently linked into a cookbook
pub async fn entry_recipe_ids(pool: &PgPool, cookbook_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let entries = entries_for(pool, cookbook_id).await?;
    Ok(entries.into_iter().map(|e| e.recipe_id).collect())
}

/// Insert a cookbook and its validated entries in one transaction.
pub async fn create(
    pool: &PgPool,
    new: &NewCookbook,
    entries: &[EntryInput],
) -> Result<Cookbook, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let cookbook = sqlx::query_as::<_, Cookbook>(
        "INSERT INTO cookbooks (title, description, image, is_private, accent_color, author_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.image)
    .bind(new.is_private)
    .bind(&new.accent_color)
    .bind(new.author_id)
    .fetch_one(&mut *tx)
    .await?;

    for entry in entries {
        insert_entry(&mut tx, cookbook.id, entry).await?;
    }

    tx.commit().await?;
    Ok(cookbook)
}

/// Update a cookbook's own columns and reconcile its entry list as a
/// delete + insert diff. Rows are never updated in place; an order change is a
/// delete followed by an insert. One transaction.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: &NewCookbook,
    to_delete: &[Uuid],
    to_insert: &[EntryInput],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE cookbooks \
         SET title = $2, description = $3, image = $4, is_private = $5, accent_color = $6, date_updated = now() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(&changes.image)
    .bind(changes.is_private)
    .bind(&changes.accent_color)
    .execute(&mut *tx)
    .await?;

    for recipe_id in to_delete {
        sqlx::query("DELETE FROM cookbook_recipes WHERE cookbook_id = $1 AND recipe_id = $2")
            .bind(id)
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
    }

    for entry in to_insert {
        insert_entry(&mut tx, id, entry).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Delete a cookbook and its entries; recipes are untouched. One transaction.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM cookbook_recipes WHERE cookbook_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM cookbooks WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn add_entry(
    pool: &PgPool,
    cookbook_id: Uuid,
    entry: &EntryInput,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    insert_entry(&mut tx, cookbook_id, entry).await?;
    tx.commit().await?;
    Ok(())
}

/// Remove one entry; returns rows affected so the caller can 404 on zero.
pub async fn remove_entry(pool: &PgPool, cookbook_id: Uuid, recipe_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cookbook_recipes WHERE cookbook_id = $1 AND recipe_id = $2")
        .bind(cookbook_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

async fn insert_entry(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    cookbook_id: Uuid,
    entry: &EntryInput,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO cookbook_recipes (cookbook_id, recipe_id, display_order) VALUES ($1, $2, $3)",
    )
    .bind(cookbook_id)
    .bind(entry.recipe_id)
    .bind(entry.display_order)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
