use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Author;

pub struct NewAuthor {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub biography: Option<String>,
    pub pseudonym: Option<String>,
    pub email_contact: Option<String>,
}

pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub biography: Option<String>,
    pub pseudonym: Option<String>,
    pub email_contact: Option<String>,
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY username")
        .fetch_all(pool)
        .await
}

/// Insert a new author. Registration never grants the admin flag.
pub async fn insert(pool: &PgPool, new: &NewAuthor) -> Result<Author, sqlx::Error> {
    sqlx::query_as::<_, Author>(
        "INSERT INTO authors \
           (username, password_hash, admin, first_name, last_name, nationality, image, biography, pseudonym, email_contact) \
         VALUES ($1, $2, FALSE, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING *",
    )
    .bind(&new.username)
    .bind(&new.password_hash)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.nationality)
    .bind(&new.image)
    .bind(&new.biography)
    .bind(&new.pseudonym)
    .bind(&new.email_contact)
    .fetch_one(pool)
    .await
}

pub async fn update_profile(pool: &PgPool, username: &str, update: &ProfileUpdate) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE authors \
         SET first_name = $2, last_name = $3, nationality = $4, image = $5, \
             biography = $6, pseudonym = $7, email_contact = $8 \
         WHERE username = $1",
    )
    .bind(username)
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.nationality)
    .bind(&update.image)
    .bind(&update.biography)
    .bind(&update.pseudonym)
    .bind(&update.email_contact)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn update_password(pool: &PgPool, username: &str, new_hash: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE authors SET password_hash = $2 WHERE username = $1")
        .bind(username)
        .bind(new_hash)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
